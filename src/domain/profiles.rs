//! 프로필 문서(JSON) 구조 정규화/병합/조회 규칙.
//!
//! 문서는 알 수 없는 키를 보존해야 하므로 `serde_json::Value` 그대로 다룬다.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::{Map, Value};

pub const PROFILES_KEY: &str = "profiles";
pub const CATALOGS_KEY: &str = "catalogs";

/// 카탈로그별 환경변수 맵.
pub type CatalogEnv = BTreeMap<String, String>;

/// Resolver가 읽는 프로필 항목의 읽기 전용 뷰.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct ProfileEntry {
    #[serde(default, deserialize_with = "lenient_string")]
    pub username: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub password: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub password_b64: Option<String>,
}

// 문자열이 아닌 값은 없는 것으로 본다.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => Some(s),
        _ => None,
    })
}

/// 구버전 문서를 `profiles` 구조로 옮기고, 모든 프로필에 `catalogs`를 보장한다.
/// 몇 번을 적용해도 결과가 같다.
pub fn ensure_structure(doc: Value) -> Value {
    let Value::Object(mut root) = doc else {
        return empty_document();
    };

    if root.contains_key(PROFILES_KEY) {
        let profiles = match root.remove(PROFILES_KEY) {
            Some(Value::Object(profiles)) => profiles,
            _ => Map::new(),
        };
        let profiles = profiles
            .into_iter()
            .map(|(name, entry)| (name, with_catalogs(entry)))
            .collect();
        root.insert(PROFILES_KEY.to_string(), Value::Object(profiles));
        return Value::Object(root);
    }

    // 구버전: 최상위 맵 값 하나하나가 프로필이다. 맵이 아닌 값은 버린다.
    let migrated: Map<String, Value> = root
        .into_iter()
        .filter(|(_, value)| value.is_object())
        .map(|(name, entry)| (name, with_catalogs(entry)))
        .collect();

    let mut out = Map::new();
    out.insert(PROFILES_KEY.to_string(), Value::Object(migrated));
    Value::Object(out)
}

fn with_catalogs(entry: Value) -> Value {
    match entry {
        Value::Object(mut map) => {
            map.entry(CATALOGS_KEY.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            Value::Object(map)
        }
        other => other,
    }
}

pub fn empty_document() -> Value {
    let mut root = Map::new();
    root.insert(PROFILES_KEY.to_string(), Value::Object(Map::new()));
    Value::Object(root)
}

/// incoming을 base 위에 재귀 병합한다.
/// 양쪽이 모두 맵이면 키 단위로 병합하고, 그 외에는 incoming 값이 대체한다.
pub fn deep_merge(base: Value, incoming: Value) -> Value {
    match (base, incoming) {
        (Value::Object(mut base_map), Value::Object(incoming_map)) => {
            for (key, value) in incoming_map {
                let merged = match base_map.remove(&key) {
                    Some(existing) => deep_merge(existing, value),
                    None => value,
                };
                base_map.insert(key, merged);
            }
            Value::Object(base_map)
        }
        (_, incoming) => incoming,
    }
}

/// `profiles[profile].catalogs[catalog]`의 복사본을 반환한다.
/// 프로필/카탈로그가 없거나 카탈로그가 비어 있으면 `None`.
pub fn lookup_catalog_env(doc: &Value, profile: &str, catalog: &str) -> Option<CatalogEnv> {
    let normalized = ensure_structure(doc.clone());
    let catalog = normalized
        .get(PROFILES_KEY)?
        .get(profile)?
        .get(CATALOGS_KEY)?
        .get(catalog)?
        .as_object()?;

    let env: CatalogEnv = catalog
        .iter()
        .filter_map(|(key, value)| value.as_str().map(|v| (key.clone(), v.to_string())))
        .collect();

    if env.is_empty() { None } else { Some(env) }
}

/// 프로필 항목 뷰를 추출한다. 없으면 빈 항목.
pub fn profile_entry(doc: &Value, profile: &str) -> ProfileEntry {
    doc.get(PROFILES_KEY)
        .and_then(|profiles| profiles.get(profile))
        .and_then(|entry| ProfileEntry::deserialize(entry).ok())
        .unwrap_or_default()
}

/// 프로필 이름 -> 정렬된 카탈로그 이름 목록.
pub fn profile_catalogs(doc: &Value) -> Vec<(String, Vec<String>)> {
    let Some(profiles) = doc.get(PROFILES_KEY).and_then(Value::as_object) else {
        return Vec::new();
    };

    profiles
        .iter()
        .map(|(name, entry)| {
            let mut catalogs: Vec<String> = entry
                .get(CATALOGS_KEY)
                .and_then(Value::as_object)
                .map(|c| c.keys().cloned().collect())
                .unwrap_or_default();
            catalogs.sort();
            (name.clone(), catalogs)
        })
        .collect()
}

// 맵이 아니면 빈 맵으로 바꾼 뒤 가변 참조를 돌려준다.
fn object_mut(value: &mut Value) -> &mut Map<String, Value> {
    if !value.is_object() {
        *value = Value::Object(Map::new());
    }
    match value {
        Value::Object(map) => map,
        _ => unreachable!("value was just replaced with an object"),
    }
}

/// `profiles[profile]` 맵을 (없으면 만들어) 가변 참조로 돌려준다.
fn profile_map_mut<'a>(doc: &'a mut Value, profile: &str) -> &'a mut Map<String, Value> {
    let profiles = object_mut(doc)
        .entry(PROFILES_KEY.to_string())
        .or_insert_with(|| Value::Object(Map::new()));
    let entry = object_mut(profiles)
        .entry(profile.to_string())
        .or_insert_with(|| Value::Object(Map::new()));
    object_mut(entry)
}

/// 프로필의 카탈로그 환경을 통째로 교체한다.
pub fn set_catalog_env(doc: &mut Value, profile: &str, catalog: &str, env: &CatalogEnv) {
    let entry = profile_map_mut(doc, profile);
    let catalogs = entry
        .entry(CATALOGS_KEY.to_string())
        .or_insert_with(|| Value::Object(Map::new()));
    let values = env
        .iter()
        .map(|(k, v)| (k.clone(), Value::String(v.clone())))
        .collect();
    object_mut(catalogs).insert(catalog.to_string(), Value::Object(values));
}

/// 프로필의 문자열 필드(username/password 등)를 설정한다.
pub fn set_profile_field(doc: &mut Value, profile: &str, field: &str, value: &str) {
    let entry = profile_map_mut(doc, profile);
    entry.insert(field.to_string(), Value::String(value.to_string()));
}
