//! Debug rendering for model values
//!
//! Model types display as `{field: value, ...}` in declaration order with
//! absent fields left out. The rendering walks the serde representation, so
//! field names match the wire names. It is a debug aid and has no parser.

use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// Render any serializable model value into `f`.
pub(crate) fn render<T: Serialize>(value: &T, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let value = serde_json::to_value(value).map_err(|_| fmt::Error)?;
    write_value(&value, f)
}

fn write_value(value: &Value, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match value {
        Value::Null => f.write_str("null"),
        Value::Bool(b) => write!(f, "{}", b),
        Value::Number(n) => write!(f, "{}", n),
        Value::String(s) => f.write_str(s),
        Value::Array(items) => {
            f.write_str("[")?;
            for (index, item) in items.iter().enumerate() {
                if index > 0 {
                    f.write_str(", ")?;
                }
                write_value(item, f)?;
            }
            f.write_str("]")
        }
        Value::Object(map) => {
            f.write_str("{")?;
            let mut first = true;
            for (key, item) in map.iter().filter(|(_, item)| !item.is_null()) {
                if !first {
                    f.write_str(", ")?;
                }
                first = false;
                write!(f, "{}: ", key)?;
                write_value(item, f)?;
            }
            f.write_str("}")
        }
    }
}

/// Implement `Display` through [`render`] for each listed model type.
macro_rules! impl_render_display {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl std::fmt::Display for $ty {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    $crate::domain::render::render(self, f)
                }
            }
        )+
    };
}

pub(crate) use impl_render_display;

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct Sample {
        mesh_name: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        limit: Option<i32>,
        ports: Vec<i32>,
        nested: Option<Inner>,
    }

    #[derive(Serialize)]
    struct Inner {
        enabled: bool,
    }

    struct Shown<'a>(&'a Sample);

    impl fmt::Display for Shown<'_> {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            render(self.0, f)
        }
    }

    #[test]
    fn omits_absent_fields_and_keeps_order() {
        let sample = Sample {
            mesh_name: "payments".to_string(),
            limit: None,
            ports: vec![8080, 8443],
            nested: Some(Inner { enabled: true }),
        };
        assert_eq!(
            Shown(&sample).to_string(),
            "{meshName: payments, ports: [8080, 8443], nested: {enabled: true}}"
        );
    }

    #[test]
    fn null_nested_field_is_dropped() {
        let sample =
            Sample { mesh_name: "m".to_string(), limit: Some(5), ports: vec![], nested: None };
        assert_eq!(Shown(&sample).to_string(), "{meshName: m, limit: 5, ports: []}");
    }
}
