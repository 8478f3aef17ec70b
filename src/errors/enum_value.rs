use thiserror::Error;

/// Raised when an external string does not name a constant of a closed
/// enumeration. Absent, empty and unrecognized input are all rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {type_name} value: '{value}'")]
pub struct InvalidEnumValue {
    /// Name of the enumeration the lookup targeted
    pub type_name: &'static str,
    /// The rejected input (empty for absent input)
    pub value: String,
}

impl InvalidEnumValue {
    pub fn new(type_name: &'static str, value: impl Into<String>) -> Self {
        Self { type_name, value: value.into() }
    }

    /// Lookup was attempted on a missing value.
    pub fn absent(type_name: &'static str) -> Self {
        Self { type_name, value: String::new() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_names_type_and_value() {
        let err = InvalidEnumValue::new("PortProtocol", "udp");
        assert_eq!(err.to_string(), "invalid PortProtocol value: 'udp'");
    }

    #[test]
    fn absent_renders_empty_value() {
        let err = InvalidEnumValue::absent("DurationUnit");
        assert_eq!(err.value, "");
        assert_eq!(err.to_string(), "invalid DurationUnit value: ''");
    }
}
