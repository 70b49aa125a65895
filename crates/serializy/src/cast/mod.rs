//! Primitive cast table.
//!
//! A cast coerces a JSON value to one primitive type. Casts never fail: when
//! a value cannot be coerced meaningfully the original value is kept and the
//! [`Cast`] carries a warning for the caller to report.

mod coerce;

use serde_json::Value;

use coerce::{number_value, parse_number, stringify, truthy, OBJECT_MARKER};

pub const ANY: &str = "any";
pub const BOOLEAN: &str = "boolean";
pub const NUMBER: &str = "number";
pub const STRING: &str = "string";
pub const OBJECT: &str = "object";
pub const FLOAT: &str = "float";
pub const INTEGER: &str = "integer";

/// Outcome of a cast: the produced value plus an optional warning.
#[derive(Debug, Clone, PartialEq)]
pub struct Cast {
    pub value: Value,
    pub warning: Option<String>,
}

impl Cast {
    fn ok(value: Value) -> Self {
        Self {
            value,
            warning: None,
        }
    }

    /// The value could not be coerced; hand it back untouched.
    fn kept(value: &Value, tag: &str) -> Self {
        Self {
            value: value.clone(),
            warning: Some(format!(
                "cannot cast value {value} to type {tag}, the original value is kept"
            )),
        }
    }
}

pub type CastFn = fn(&Value) -> Cast;

pub fn any(value: &Value) -> Cast {
    Cast::ok(value.clone())
}

pub fn boolean(value: &Value) -> Cast {
    Cast::ok(Value::Bool(truthy(value)))
}

pub fn number(value: &Value) -> Cast {
    let coerced = match value {
        Value::Number(_) => return Cast::ok(value.clone()),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Null => Some(0.0),
        Value::String(s) => parse_number(s),
        Value::Array(_) | Value::Object(_) => None,
    };
    match coerced.and_then(number_value) {
        Some(n) => Cast::ok(n),
        None => Cast::kept(value, NUMBER),
    }
}

pub fn string(value: &Value) -> Cast {
    match value {
        Value::String(_) => Cast::ok(value.clone()),
        other => {
            let text = stringify(other);
            if text == OBJECT_MARKER {
                return Cast::kept(value, STRING);
            }
            Cast::ok(Value::String(text))
        }
    }
}

/// Shallow copy of a plain object.
pub fn object(value: &Value) -> Cast {
    match value {
        Value::Object(map) => Cast::ok(Value::Object(map.clone())),
        _ => Cast::kept(value, OBJECT),
    }
}

/// Number with a decimal comma accepted (`"3,14"` → `3.14`).
pub fn float(value: &Value) -> Cast {
    if let Value::Number(_) = value {
        return Cast::ok(value.clone());
    }
    let text = stringify(value).replacen(',', ".", 1);
    match parse_number(&text).and_then(number_value) {
        Some(n) => Cast::ok(n),
        None => Cast::kept(value, FLOAT),
    }
}

/// Number rounded to zero decimals, half away from zero.
pub fn integer(value: &Value) -> Cast {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        other => parse_number(&stringify(other)),
    };
    match parsed.map(f64::round).and_then(number_value) {
        Some(n) => Cast::ok(n),
        None => Cast::kept(value, INTEGER),
    }
}

/// Registry of casts addressable by their type tag.
#[derive(Clone)]
pub struct CastTable {
    entries: Vec<(&'static str, CastFn)>,
}

impl CastTable {
    /// Every cast, including the derived `float` and `integer`.
    pub fn standard() -> Self {
        let mut table = Self::basic();
        table.entries.push((FLOAT, float));
        table.entries.push((INTEGER, integer));
        table
    }

    /// The five primitive casts only.
    pub fn basic() -> Self {
        Self {
            entries: vec![
                (ANY, any),
                (BOOLEAN, boolean),
                (NUMBER, number),
                (STRING, string),
                (OBJECT, object),
            ],
        }
    }

    pub fn get(&self, tag: &str) -> Option<CastFn> {
        self.entries
            .iter()
            .find(|(name, _)| *name == tag)
            .map(|(_, cast)| *cast)
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.get(tag).is_some()
    }

    /// Registered tags, in registration order.
    pub fn tags(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(name, _)| *name)
    }
}

impl Default for CastTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl std::fmt::Debug for CastTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.tags()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const TEST_F64_3_14: f64 = 314.0 / 100.0;

    #[test]
    fn any_is_identity() {
        let v = json!({"a": [1, 2]});
        assert_eq!(any(&v), Cast::ok(v.clone()));
    }

    #[test]
    fn boolean_uses_truthiness() {
        assert_eq!(boolean(&json!("")).value, json!(false));
        assert_eq!(boolean(&json!("no")).value, json!(true));
        assert_eq!(boolean(&json!(0)).value, json!(false));
        assert_eq!(boolean(&json!(null)).value, json!(false));
        assert!(boolean(&json!({})).warning.is_none());
    }

    #[test]
    fn number_coerces_primitives() {
        assert_eq!(number(&json!("42")), Cast::ok(json!(42)));
        assert_eq!(number(&json!(" 2.5 ")), Cast::ok(json!(2.5)));
        assert_eq!(number(&json!(true)), Cast::ok(json!(1)));
        assert_eq!(number(&json!(null)), Cast::ok(json!(0)));
        assert_eq!(number(&json!(7.25)), Cast::ok(json!(7.25)));
    }

    #[test]
    fn number_keeps_uncastable_value() {
        let cast = number(&json!("abc"));
        assert_eq!(cast.value, json!("abc"));
        assert!(cast.warning.unwrap().contains("number"));

        let cast = number(&json!([1]));
        assert_eq!(cast.value, json!([1]));
        assert!(cast.warning.is_some());
    }

    #[test]
    fn string_stringifies() {
        assert_eq!(string(&json!(42)), Cast::ok(json!("42")));
        assert_eq!(string(&json!(false)), Cast::ok(json!("false")));
        assert_eq!(string(&json!(null)), Cast::ok(json!("null")));
        assert_eq!(string(&json!(["a", 1])), Cast::ok(json!("a,1")));
    }

    #[test]
    fn string_passes_objects_through_with_warning() {
        let v = json!({"a": 1});
        let cast = string(&v);
        assert_eq!(cast.value, v);
        assert!(cast.warning.is_some());
    }

    #[test]
    fn object_copies_plain_objects_only() {
        assert_eq!(object(&json!({"a": 1})), Cast::ok(json!({"a": 1})));
        let cast = object(&json!([1]));
        assert_eq!(cast.value, json!([1]));
        assert!(cast.warning.is_some());
    }

    #[test]
    fn float_accepts_decimal_comma() {
        assert_eq!(float(&json!("3,14")), Cast::ok(json!(TEST_F64_3_14)));
        assert_eq!(float(&json!("3.5")), Cast::ok(json!(3.5)));
        assert_eq!(float(&json!(1.25)), Cast::ok(json!(1.25)));
        let cast = float(&json!("x,y"));
        assert_eq!(cast.value, json!("x,y"));
        assert!(cast.warning.is_some());
    }

    #[test]
    fn integer_rounds() {
        assert_eq!(integer(&json!("2.5")), Cast::ok(json!(3)));
        assert_eq!(integer(&json!(2.4)), Cast::ok(json!(2)));
        assert_eq!(integer(&json!("-2.5")), Cast::ok(json!(-3)));
        assert_eq!(integer(&json!("17")), Cast::ok(json!(17)));
        let cast = integer(&json!("seven"));
        assert_eq!(cast.value, json!("seven"));
        assert!(cast.warning.is_some());
    }

    #[test]
    fn standard_table_has_derived_casts() {
        let table = CastTable::standard();
        assert!(table.contains(FLOAT));
        assert!(table.contains(INTEGER));
        assert_eq!(
            table.tags().collect::<Vec<_>>(),
            vec!["any", "boolean", "number", "string", "object", "float", "integer"]
        );
    }

    #[test]
    fn basic_table_lacks_derived_casts() {
        let table = CastTable::basic();
        assert!(table.contains(NUMBER));
        assert!(!table.contains(FLOAT));
        assert!(table.get("integer").is_none());
    }

    #[test]
    fn lookup_by_tag_dispatches() {
        let table = CastTable::default();
        let cast = table.get("float").unwrap();
        assert_eq!(cast(&json!("1,5")).value, json!(1.5));
        assert_eq!(format!("{:?}", CastTable::basic()).matches(',').count(), 4);
    }
}
