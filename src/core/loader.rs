use std::{
    borrow::Cow,
    collections::{HashMap, HashSet},
    convert::{TryFrom, TryInto},
};

/// A JSON object flattened into typed values, with tracking of which keys were read.
pub struct InputParams {
    params: HashMap<String, InputParamsValue>,
    name: Cow<'static, str>,
    visited_names: HashSet<String>,
}

pub enum InputParamsValue {
    Int(i32),
    Float(f32),
    Bool(bool),
    String(String),
    Array(Vec<InputParamsValue>),
}

macro_rules! params_get {
    ( $( ( $name:ident, $type:ty, $accessor:ident, $hint:expr ) ),+ $(,)? ) => {
        $(
            paste::paste! {
                #[allow(dead_code)]
                pub fn [<get_ $name>](&mut self, key: &str) -> anyhow::Result<$type> {
                    if let Some(value) = self.params.get(key) {
                        if let Some(value) = value.$accessor() {
                            self.visited_names.insert(key.to_owned());
                            return Ok(value);
                        }
                        anyhow::bail!(format!("{} - '{}' should be {}", self.name, key, $hint));
                    }
                    anyhow::bail!(format!("{} - there is no '{}' field", self.name, key));
                }

                #[allow(dead_code)]
                pub fn [<get_ $name _or>](&mut self, key: &str, fallback: $type) -> anyhow::Result<$type> {
                    if self.params.contains_key(key) {
                        self.[<get_ $name>](key)
                    } else {
                        Ok(fallback)
                    }
                }
            }
        )+
    };
}

macro_rules! params_get_vec {
    ( $( ( $name:ident, $type:ty, $len:expr, $accessor:ident, $hint:expr ) ),+ $(,)? ) => {
        $(
            paste::paste! {
                #[allow(dead_code)]
                pub fn [<get_ $name>](&mut self, key: &str) -> anyhow::Result<[$type; $len]> {
                    if let Some(value) = self.params.get(key) {
                        let error_info = format!(
                            "{} - '{}' should be array with {} {}s",
                            self.name,
                            key,
                            $len,
                            $hint,
                        );
                        if let InputParamsValue::Array(arr) = value {
                            if arr.len() == $len {
                                let mut result: [$type; $len] = Default::default();
                                for (res, ele) in result.iter_mut().zip(arr) {
                                    *res = ele.$accessor().ok_or_else(|| anyhow::anyhow!(error_info.clone()))?;
                                }
                                self.visited_names.insert(key.to_owned());
                                return Ok(result);
                            }
                        }
                        anyhow::bail!(error_info);
                    }
                    anyhow::bail!(format!("{} - there is no '{}' field", self.name, key));
                }

                #[allow(dead_code)]
                pub fn [<get_ $name _or>](
                    &mut self,
                    key: &str,
                    fallback: [$type; $len],
                ) -> anyhow::Result<[$type; $len]> {
                    if self.params.contains_key(key) {
                        self.[<get_ $name>](key)
                    } else {
                        Ok(fallback)
                    }
                }
            }
        )+
    };
}

impl InputParamsValue {
    fn as_int(&self) -> Option<i32> {
        if let Self::Int(v) = self {
            Some(*v)
        } else {
            None
        }
    }

    // integers are accepted where floats are expected, `"fov": 60` is common
    fn as_float(&self) -> Option<f32> {
        match self {
            Self::Float(v) => Some(*v),
            Self::Int(v) => Some(*v as f32),
            _ => None,
        }
    }

    fn as_bool(&self) -> Option<bool> {
        if let Self::Bool(v) = self {
            Some(*v)
        } else {
            None
        }
    }
}

impl InputParams {
    pub fn set_name(&mut self, name: Cow<'static, str>) {
        self.name = name;
    }

    pub fn name(&self) -> &str {
        self.name.as_ref()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.params.contains_key(key)
    }

    params_get! {
        (int, i32, as_int, "integer"),
        (float, f32, as_float, "float"),
        (bool, bool, as_bool, "boolean"),
    }

    params_get_vec! {
        (int4, i32, 4, as_int, "integer"),
        (float3, f32, 3, as_float, "float"),
    }

    pub fn get_str(&mut self, key: &str) -> anyhow::Result<String> {
        if let Some(value) = self.params.get(key) {
            if let InputParamsValue::String(value) = value {
                self.visited_names.insert(key.to_owned());
                return Ok(value.clone());
            }
            anyhow::bail!(format!("{} - '{}' should be string", self.name, key));
        }
        anyhow::bail!(format!("{} - there is no '{}' field", self.name, key));
    }

    pub fn get_str_or(&mut self, key: &str, fallback: &str) -> anyhow::Result<String> {
        if self.params.contains_key(key) {
            self.get_str(key)
        } else {
            Ok(fallback.to_owned())
        }
    }

    /// Keys starting with `#` are comments and never reported.
    pub fn check_unused_keys(&self) {
        for k in self.params.keys() {
            if !k.starts_with('#') && !self.visited_names.contains(k) {
                log::warn!("{} - unused key '{}'", self.name, k);
            }
        }
    }

    #[cfg(test)]
    pub fn unused_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self
            .params
            .keys()
            .filter(|k| !k.starts_with('#') && !self.visited_names.contains(*k))
            .map(|k| k.as_str())
            .collect();
        keys.sort_unstable();
        keys
    }
}

impl TryFrom<&serde_json::Value> for InputParamsValue {
    type Error = anyhow::Error;

    fn try_from(value: &serde_json::Value) -> Result<Self, Self::Error> {
        match value {
            serde_json::Value::Null => {
                anyhow::bail!("can't convert to InputParamsValue from null json")
            }
            serde_json::Value::Bool(v) => Ok(Self::Bool(*v)),
            serde_json::Value::Number(v) => {
                if let Some(v) = v.as_i64() {
                    Ok(Self::Int(v as i32))
                } else if let Some(v) = v.as_f64() {
                    Ok(Self::Float(v as f32))
                } else {
                    anyhow::bail!("can't convert number '{}' to InputParamsValue", v)
                }
            }
            serde_json::Value::String(v) => Ok(Self::String(v.clone())),
            serde_json::Value::Array(arr) => {
                let mut values = Vec::<InputParamsValue>::with_capacity(arr.len());
                for v in arr {
                    match v.try_into() {
                        Ok(v) => values.push(v),
                        Err(e) => anyhow::bail!(format!("can't convert array element: {}", e)),
                    }
                }
                Ok(Self::Array(values))
            }
            serde_json::Value::Object(_) => {
                anyhow::bail!("can't convert to InputParamsValue from object json")
            }
        }
    }
}

impl TryFrom<&serde_json::Value> for InputParams {
    type Error = anyhow::Error;

    fn try_from(value: &serde_json::Value) -> Result<Self, Self::Error> {
        if let serde_json::Value::Object(value) = value {
            let mut params = HashMap::<String, InputParamsValue>::with_capacity(value.len());
            for (k, v) in value {
                match v.try_into() {
                    Ok(v) => {
                        params.insert(k.clone(), v);
                    }
                    Err(e) => anyhow::bail!(format!("can't convert member '{}': {}", k, e)),
                }
            }
            Ok(Self {
                params,
                name: Cow::Owned("".to_owned()),
                visited_names: HashSet::new(),
            })
        } else {
            anyhow::bail!("can't convert to InputParams from non-object json value");
        }
    }
}

impl TryFrom<serde_json::Value> for InputParams {
    type Error = anyhow::Error;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        (&value).try_into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(value: serde_json::Value) -> InputParams {
        value.try_into().unwrap()
    }

    #[test]
    fn test_typed_getters() {
        let mut p = params(serde_json::json!({
            "fov": 60,
            "near": 0.5,
            "flag": true,
            "eye": [0, 1.5, -2],
            "tile": [2, 1, 0, 0],
            "type": "perspective",
        }));
        assert_eq!(p.get_float("fov").unwrap(), 60.0);
        assert_eq!(p.get_float("near").unwrap(), 0.5);
        assert!(p.get_bool("flag").unwrap());
        assert_eq!(p.get_float3("eye").unwrap(), [0.0, 1.5, -2.0]);
        assert_eq!(p.get_int4("tile").unwrap(), [2, 1, 0, 0]);
        assert_eq!(p.get_str("type").unwrap(), "perspective");
        assert!(p.unused_keys().is_empty());
    }

    #[test]
    fn test_fallbacks_and_errors() {
        let mut p = params(serde_json::json!({ "near": "far", "eye": [1, 2] }));
        assert_eq!(p.get_float_or("far", 10.0).unwrap(), 10.0);
        assert!(p.get_float_or("near", 1.0).is_err());
        assert!(p.get_float3("eye").is_err());
        assert!(p.get_int("missing").is_err());
        assert_eq!(p.get_str_or("type", "perspective").unwrap(), "perspective");
        assert_eq!(p.unused_keys(), vec!["eye", "near"]);
    }

    #[test]
    fn test_comment_keys_are_ignored() {
        let p = params(serde_json::json!({ "#note": "ignored" }));
        assert!(p.unused_keys().is_empty());
    }

    #[test]
    fn test_rejects_non_objects() {
        let res: anyhow::Result<InputParams> = serde_json::json!([1, 2, 3]).try_into();
        assert!(res.is_err());
        let res: anyhow::Result<InputParams> = serde_json::json!({ "nested": { "a": 1 } }).try_into();
        assert!(res.is_err());
    }
}
