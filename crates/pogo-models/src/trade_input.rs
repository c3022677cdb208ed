use std::fmt;

use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

use crate::catalog::{TableKey, VariantFlag};

/// The variant flags a caller switched on for one item, in the order they
/// appeared in the request.
///
/// Decodes from an option map such as `{"shiny": true, "lucky": false}`. Only
/// the literal value `true` enables a flag; unknown names and non-boolean
/// values are ignored. A repeated name counts once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariantFlags(Vec<VariantFlag>);

impl VariantFlags {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn enable(&mut self, flag: VariantFlag) {
        if !self.0.contains(&flag) {
            self.0.push(flag);
        }
    }

    pub fn contains(&self, flag: VariantFlag) -> bool {
        self.0.contains(&flag)
    }

    pub fn iter(&self) -> impl Iterator<Item = VariantFlag> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<VariantFlag> for VariantFlags {
    fn from_iter<I: IntoIterator<Item = VariantFlag>>(iter: I) -> Self {
        let mut flags = Self::new();
        for flag in iter {
            flags.enable(flag);
        }
        flags
    }
}

impl Serialize for VariantFlags {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|f| (f.as_str(), true)))
    }
}

impl<'de> Deserialize<'de> for VariantFlags {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct FlagsVisitor;

        impl<'de> Visitor<'de> for FlagsVisitor {
            type Value = VariantFlags;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an object mapping option names to booleans")
            }

            fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(VariantFlags::new())
            }

            fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(VariantFlags::new())
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut flags = VariantFlags::new();
                while let Some((name, value)) = map.next_entry::<String, serde_json::Value>()? {
                    if value != serde_json::Value::Bool(true) {
                        continue;
                    }
                    if let Some(flag) = VariantFlag::from_name(&name) {
                        flags.enable(flag);
                    }
                }
                Ok(flags)
            }
        }

        deserializer.deserialize_any(FlagsVisitor)
    }
}

/// Accepts an integer JSON number or a string holding one.
///
/// Any integer is a well-formed id, including ones no catalog can contain
/// (negative, above `u32::MAX`); those simply fail to resolve.
fn deserialize_creature_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    struct IdVisitor;

    impl<'de> Visitor<'de> for IdVisitor {
        type Value = i64;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("an integer id or a string holding one")
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<i64, E> {
            i64::try_from(v).map_err(|_| E::custom(format!("creature id out of range: {v}")))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<i64, E> {
            Ok(v)
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<i64, E> {
            if v.is_finite() && v.fract() == 0.0 && v >= i64::MIN as f64 && v < i64::MAX as f64 {
                Ok(v as i64)
            } else {
                Err(E::custom(format!("creature id must be an integer: {v}")))
            }
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<i64, E> {
            v.trim()
                .parse::<i64>()
                .map_err(|_| E::custom(format!("creature id is not an integer: {v:?}")))
        }
    }

    deserializer.deserialize_any(IdVisitor)
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// One creature offered on one side of a trade.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TradeItem {
    #[serde(
        rename = "pokemonId",
        alias = "creatureId",
        deserialize_with = "deserialize_creature_id"
    )]
    pub creature_id: i64,
    #[serde(default, rename = "options", alias = "flags")]
    pub flags: VariantFlags,
}

impl TradeItem {
    pub fn new(creature_id: impl Into<i64>) -> Self {
        Self {
            creature_id: creature_id.into(),
            flags: VariantFlags::new(),
        }
    }

    pub fn with_flag(mut self, flag: VariantFlag) -> Self {
        self.flags.enable(flag);
        self
    }
}

/// Items one participant puts into the trade, in submission order.
pub type TradeSide = Vec<TradeItem>;

/// A two-sided trade submitted for valuation. Absent sides are empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TradeProposal {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub left: TradeSide,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub right: TradeSide,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_wire_shape() {
        let json = r#"{
            "left": [{"pokemonId": 25, "options": {"shiny": true, "lucky": false}}],
            "right": [{"pokemonId": "150", "options": {}}]
        }"#;
        let proposal: TradeProposal = serde_json::from_str(json).unwrap();
        assert_eq!(proposal.left.len(), 1);
        assert_eq!(proposal.left[0].creature_id, 25);
        assert!(proposal.left[0].flags.contains(VariantFlag::Shiny));
        assert!(!proposal.left[0].flags.contains(VariantFlag::Lucky));
        assert_eq!(proposal.right[0].creature_id, 150);
        assert!(proposal.right[0].flags.is_empty());
    }

    #[test]
    fn missing_and_null_sides_are_empty() {
        let proposal: TradeProposal = serde_json::from_str("{}").unwrap();
        assert_eq!(proposal, TradeProposal::default());

        let proposal: TradeProposal =
            serde_json::from_str(r#"{"left": null, "right": [{"pokemonId": 1}]}"#).unwrap();
        assert!(proposal.left.is_empty());
        assert_eq!(proposal.right, vec![TradeItem::new(1)]);
    }

    #[test]
    fn flags_keep_input_order_and_drop_unknowns() {
        let json = r#"{"pokemonId": 1, "options": {
            "lucky": true, "sparkly": true, "shadow": "yes", "shiny": true, "legacyMove": true
        }}"#;
        let item: TradeItem = serde_json::from_str(json).unwrap();
        let flags: Vec<VariantFlag> = item.flags.iter().collect();
        assert_eq!(
            flags,
            vec![VariantFlag::Lucky, VariantFlag::Shiny, VariantFlag::LegacyMove]
        );
    }

    #[test]
    fn null_options_mean_no_flags() {
        let item: TradeItem = serde_json::from_str(r#"{"pokemonId": 3, "options": null}"#).unwrap();
        assert!(item.flags.is_empty());
    }

    #[test]
    fn creature_id_alias_and_trimmed_string() {
        let item: TradeItem = serde_json::from_str(r#"{"creatureId": " 42 "}"#).unwrap();
        assert_eq!(item.creature_id, 42);

        let item: TradeItem = serde_json::from_str(r#"{"pokemonId": 7.0}"#).unwrap();
        assert_eq!(item.creature_id, 7);
    }

    #[test]
    fn unresolvable_integer_ids_still_decode() {
        for (body, id) in [
            (r#"{"pokemonId": -1}"#, -1),
            (r#"{"pokemonId": "-3"}"#, -3),
            (r#"{"pokemonId": 4294967296}"#, 4_294_967_296),
            (r#"{"pokemonId": -2.0}"#, -2),
        ] {
            let item: TradeItem = serde_json::from_str(body).unwrap();
            assert_eq!(item.creature_id, id, "{body}");
        }
    }

    #[test]
    fn rejects_malformed_ids() {
        for body in [
            r#"{"pokemonId": "pikachu"}"#,
            r#"{"pokemonId": ""}"#,
            r#"{"pokemonId": "2.5"}"#,
            r#"{"pokemonId": 2.5}"#,
            r#"{"pokemonId": 1e300}"#,
            r#"{"pokemonId": 18446744073709551615}"#,
            r#"{"pokemonId": true}"#,
            r#"{"options": {}}"#,
        ] {
            assert!(
                serde_json::from_str::<TradeItem>(body).is_err(),
                "expected rejection: {body}"
            );
        }
    }

    #[test]
    fn rejects_non_object_options() {
        assert!(serde_json::from_str::<TradeItem>(r#"{"pokemonId": 1, "options": ["shiny"]}"#).is_err());
    }

    #[test]
    fn flags_serialize_as_enabled_map() {
        let item = TradeItem::new(9).with_flag(VariantFlag::Shadow);
        assert_eq!(
            serde_json::to_value(&item).unwrap(),
            serde_json::json!({"pokemonId": 9, "options": {"shadow": true}})
        );
    }

    #[test]
    fn repeated_flag_counts_once() {
        let flags: VariantFlags = [VariantFlag::Shiny, VariantFlag::Shiny].into_iter().collect();
        assert_eq!(flags.len(), 1);
    }
}
