use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;
use utoipa::IntoParams;

/// A selection of fields, applied to the serialized form of a value.
///
/// Arrays are projected element by element, so the same selection works for a single item and
/// for a list of items.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Fields {
    /// Keep everything
    #[default]
    All,
    /// Keep everything but the listed paths.
    ///
    /// A path may be dotted (`hero_powers.power`), descending into nested objects and arrays.
    Except(Vec<String>),
    /// Keep only the listed top-level fields.
    ///
    /// Nested values are dropped as a whole, unless their field is listed.
    Only(Vec<String>),
}

impl Fields {
    pub fn except<I>(paths: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self::Except(paths.into_iter().map(Into::into).collect())
    }

    pub fn only<I>(names: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self::Only(names.into_iter().map(Into::into).collect())
    }

    /// Serialize the value and apply the selection.
    pub fn project<T: Serialize>(&self, value: &T) -> Result<Value, serde_json::Error> {
        Ok(self.apply(serde_json::to_value(value)?))
    }

    /// Apply the selection to an already serialized value.
    pub fn apply(&self, value: Value) -> Value {
        match self {
            Self::All => value,
            Self::Except(paths) => {
                let mut value = value;
                for path in paths {
                    let segments = path.split('.').collect::<Vec<_>>();
                    remove_path(&mut value, &segments);
                }
                value
            }
            Self::Only(names) => {
                let names = names.iter().map(String::as_str).collect::<HashSet<_>>();
                retain_fields(value, &names)
            }
        }
    }
}

fn remove_path(value: &mut Value, segments: &[&str]) {
    let Some((first, rest)) = segments.split_first() else {
        return;
    };

    match value {
        Value::Array(items) => {
            for item in items {
                remove_path(item, segments);
            }
        }
        Value::Object(map) if rest.is_empty() => {
            map.remove(*first);
        }
        Value::Object(map) => {
            if let Some(child) = map.get_mut(*first) {
                remove_path(child, rest);
            }
        }
        _ => {}
    }
}

fn retain_fields(value: Value, names: &HashSet<&str>) -> Value {
    match value {
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|item| retain_fields(item, names))
                .collect(),
        ),
        Value::Object(map) => Value::Object(
            map.into_iter()
                .filter(|(k, _)| names.contains(k.as_str()))
                .collect::<Map<_, _>>(),
        ),
        value => value,
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FieldsError {
    #[error("'only' and 'exclude' cannot be used at the same time")]
    Conflicting,
}

/// Ad-hoc field selection, provided by the caller of an endpoint.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FieldsQuery {
    /// Comma separated list of the only fields to return
    #[serde(default)]
    pub only: Option<String>,
    /// Comma separated list of (dotted) field paths to omit
    #[serde(default)]
    pub exclude: Option<String>,
}

fn split_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .collect()
}

impl TryFrom<FieldsQuery> for Fields {
    type Error = FieldsError;

    fn try_from(value: FieldsQuery) -> Result<Self, Self::Error> {
        match (value.only, value.exclude) {
            (Some(_), Some(_)) => Err(FieldsError::Conflicting),
            (Some(only), None) => Ok(Fields::Only(split_list(&only))),
            (None, Some(exclude)) => Ok(Fields::Except(split_list(&exclude))),
            (None, None) => Ok(Fields::All),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    fn hero() -> Value {
        json!({
            "id": 1,
            "name": "Kamala Khan",
            "super_name": "Ms. Marvel",
            "hero_powers": [
                {
                    "id": 1,
                    "strength": "Strong",
                    "hero_id": 1,
                    "power_id": 2,
                    "power": { "id": 2, "name": "flight", "description": "gives the wielder the ability to fly" }
                }
            ]
        })
    }

    #[test]
    fn all_is_identity() {
        assert_eq!(Fields::All.apply(hero()), hero());
    }

    #[test]
    fn except_top_level() {
        assert_eq!(
            Fields::except(["hero_powers"]).apply(hero()),
            json!({"id": 1, "name": "Kamala Khan", "super_name": "Ms. Marvel"})
        );
    }

    #[test]
    fn except_through_arrays() {
        let result = Fields::except(["hero_powers.power", "hero_powers.hero_id"]).apply(hero());
        assert_eq!(
            result["hero_powers"],
            json!([{ "id": 1, "strength": "Strong", "power_id": 2 }])
        );
    }

    #[test]
    fn except_unknown_path_is_ignored() {
        assert_eq!(Fields::except(["foo.bar", "name.x"]).apply(hero()), hero());
    }

    #[test]
    fn only_drops_relationships() {
        assert_eq!(
            Fields::only(["id", "name"]).apply(hero()),
            json!({"id": 1, "name": "Kamala Khan"})
        );
    }

    #[test]
    fn only_applies_to_each_item() {
        assert_eq!(
            Fields::only(["id"]).apply(json!([{"id": 1, "name": "a"}, {"id": 2, "name": "b"}])),
            json!([{"id": 1}, {"id": 2}])
        );
    }

    #[test]
    fn from_query() {
        assert_eq!(Fields::try_from(FieldsQuery::default()), Ok(Fields::All));
        assert_eq!(
            Fields::try_from(FieldsQuery {
                only: Some("id, name,,".into()),
                exclude: None,
            }),
            Ok(Fields::only(["id", "name"]))
        );
        assert_eq!(
            Fields::try_from(FieldsQuery {
                only: None,
                exclude: Some("hero_powers.power".into()),
            }),
            Ok(Fields::except(["hero_powers.power"]))
        );
        assert_eq!(
            Fields::try_from(FieldsQuery {
                only: Some("id".into()),
                exclude: Some("name".into()),
            }),
            Err(FieldsError::Conflicting)
        );
    }
}
