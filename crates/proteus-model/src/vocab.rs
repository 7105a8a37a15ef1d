//! Fixed XML vocabulary and default values
//!
//! Tag and attribute names are part of the persisted document format and must
//! never change.

/// Name used when a property is constructed with a blank name
pub const DEFAULT_NAME: &str = "unnamed";

/// Category used when a property is constructed with a blank category
pub const DEFAULT_CATEGORY: &str = "general";

/// Trace type used when none is given
pub const DEFAULT_TRACE_TYPE: &str = "proteus-generic";

/// Class sentinel meaning "a trace may point to any class"
pub const PROTEUS_ANY: &str = ":Proteus-any";

/// `maxTargetsNumber` sentinel meaning "no limit"
pub const NO_TARGETS_LIMIT: i64 = -1;

/// Property element tags
pub mod tags {
    /// Free text, stored as CDATA
    pub const STRING_PROPERTY: &str = "stringProperty";
    /// Markdown source text, stored as CDATA
    pub const MARKDOWN_PROPERTY: &str = "markdownProperty";
    /// URL text, stored as CDATA
    pub const URL_PROPERTY: &str = "urlProperty";
    /// File path text, stored as CDATA
    pub const FILE_PROPERTY: &str = "fileProperty";
    /// `true` or `false`
    pub const BOOLEAN_PROPERTY: &str = "booleanProperty";
    /// Signed 64-bit integer
    pub const INTEGER_PROPERTY: &str = "integerProperty";
    /// 64-bit float
    pub const FLOAT_PROPERTY: &str = "floatProperty";
    /// Calendar date, `YYYY-MM-DD`
    pub const DATE_PROPERTY: &str = "dateProperty";
    /// Time of day, `HH:MM:SS`
    pub const TIME_PROPERTY: &str = "timeProperty";
    /// One value out of a `choices` list
    pub const ENUM_PROPERTY: &str = "enumProperty";
    /// Ordered list of class names
    pub const CLASS_LIST_PROPERTY: &str = "classListProperty";
    /// Measurement restricted to a `units` vocabulary
    pub const UNIT_PROPERTY: &str = "unitProperty";
    /// References to other document objects
    pub const TRACE_PROPERTY: &str = "traceProperty";

    /// Container holding the properties of a document object
    pub const PROPERTIES: &str = "properties";

    /// Child of `unitProperty` carrying the magnitude
    pub const VALUE: &str = "value";
    /// Child of `unitProperty` carrying the unit token
    pub const UNIT: &str = "unit";
    /// Child of `traceProperty`, one per target
    pub const TRACE: &str = "trace";
    /// Child of `classListProperty`, one per class
    pub const CLASS: &str = "class";
}

/// Attribute names
pub mod attributes {
    /// Property name, unique within a `properties` container
    pub const NAME: &str = "name";
    /// Grouping shown to the user
    pub const CATEGORY: &str = "category";
    /// Help text; omitted when empty
    pub const TOOLTIP: &str = "tooltip";
    /// Written only when `true`
    pub const REQUIRED: &str = "required";
    /// Written only when `true`
    pub const INMUTABLE: &str = "inmutable";
    /// Whitespace-separated unit vocabulary of a unit property
    pub const UNITS: &str = "units";
    /// Whitespace-separated choices of an enum property
    pub const CHOICES: &str = "choices";
    /// Classes a trace may point to
    pub const ACCEPTED_TARGETS: &str = "acceptedTargets";
    /// Classes a trace may never point to
    pub const EXCLUDED_TARGETS: &str = "excludedTargets";
    /// Kind of trace, on the property and on each `trace` child
    pub const TRACE_TYPE: &str = "traceType";
    /// Upper bound on trace targets; omitted when unlimited
    pub const MAX_TARGETS_NUMBER: &str = "maxTargetsNumber";
    /// Target id of a `trace` child
    pub const TARGET: &str = "target";
}
