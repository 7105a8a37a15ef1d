//! Concrete property kinds

pub mod class_list;
pub mod enumeration;
pub mod simple;
pub mod trace;
pub mod unit;

pub use class_list::ClassListProperty;
pub use enumeration::EnumProperty;
pub use simple::{
    BooleanKind, BooleanProperty, DateKind, DateProperty, FileKind, FileProperty, FloatKind,
    FloatProperty, IntegerKind, IntegerProperty, MarkdownKind, MarkdownProperty, SimpleKind,
    SimpleProperty, StringKind, StringProperty, TimeKind, TimeProperty, UrlKind, UrlProperty,
};
pub use trace::{TraceProperty, TraceSettings};
pub use unit::UnitProperty;
