// src/model.rs

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One page of the rank-details response body.
///
/// `total` is only meaningful on the first page; later pages repeat it but the
/// fetcher has stopped looking by then. Missing keys deserialize to empty/zero
/// rather than failing the whole page.
#[derive(Debug, Deserialize)]
pub struct RankPage {
    #[serde(default)]
    pub rows: Vec<RawRecord>,
    #[serde(default)]
    pub total: u64,
}

/// One ranked entity as the API sends it.
///
/// Ranking, wealth and age arrive as either JSON numbers or strings depending
/// on the list year, so those stay as raw values until coercion. Everything
/// else on the wire that we don't map is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRecord {
    #[serde(rename = "hs_Rank_Rich_Ranking")]
    pub ranking: Option<Value>,
    #[serde(rename = "hs_Rank_Rich_ChaName_Cn")]
    pub name: Option<String>,
    #[serde(rename = "hs_Rank_Rich_Wealth")]
    pub wealth: Option<Value>,
    #[serde(rename = "hs_Rank_Rich_Wealth_Change")]
    pub wealth_change: Option<String>,
    #[serde(rename = "hs_Rank_Rich_ComName_Cn")]
    pub company: Option<String>,
    #[serde(rename = "hs_Rank_Rich_Industry_Cn")]
    pub industry: Option<String>,
    #[serde(rename = "hs_Rank_Rich_ComHeadquarters_Cn")]
    pub headquarters: Option<String>,
    #[serde(rename = "hs_Character", default)]
    pub characters: Vec<Character>,
}

/// Person sub-record nested under `hs_Character`. At most the first entry is
/// used; the API occasionally lists co-founders as extra entries.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Character {
    #[serde(rename = "hs_Character_Gender")]
    pub gender: Option<String>,
    #[serde(rename = "hs_Character_Age")]
    pub age: Option<Value>,
    #[serde(rename = "hs_Character_BirthPlace_Cn")]
    pub birthplace: Option<String>,
    #[serde(rename = "hs_Character_Education_Cn")]
    pub education: Option<String>,
    #[serde(rename = "hs_Character_School_Cn")]
    pub school: Option<String>,
    #[serde(rename = "hs_Character_Birthday")]
    pub birthday: Option<String>,
}

/// One flattened output row.
///
/// Text columns default to the empty string when the source record carries no
/// person sub-record; the two numeric columns use `None` for missing or
/// un-parseable input instead. The asymmetry is deliberate and round-trips
/// through CSV (empty cell either way, but `wealth`/`age` re-read as `None`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlatRow {
    pub rank: String,
    pub name: String,
    pub wealth: Option<f64>,
    pub wealth_change: String,
    pub company: String,
    pub industry: String,
    pub headquarters: String,
    pub gender: String,
    pub age: Option<f64>,
    pub birthplace: String,
    pub education: String,
    pub school: String,
    pub birthday: String,
}

/// Coerce a loosely-typed wire value to a finite float.
///
/// Numbers pass through, numeric strings are parsed, everything else (null,
/// objects, `"--"`, ...) becomes `None`.
pub fn coerce_numeric(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64().filter(|f| f.is_finite()),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}

/// Render a loosely-typed wire value as display text, empty when absent.
fn text_of(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

/// Flatten one raw record into exactly one output row.
pub fn flatten(record: &RawRecord) -> FlatRow {
    let person = record.characters.first();
    FlatRow {
        rank: text_of(record.ranking.as_ref()),
        name: record.name.clone().unwrap_or_default(),
        wealth: coerce_numeric(record.wealth.as_ref()),
        wealth_change: record.wealth_change.clone().unwrap_or_default(),
        company: record.company.clone().unwrap_or_default(),
        industry: record.industry.clone().unwrap_or_default(),
        headquarters: record.headquarters.clone().unwrap_or_default(),
        gender: person
            .and_then(|p| p.gender.clone())
            .unwrap_or_default(),
        age: coerce_numeric(person.and_then(|p| p.age.as_ref())),
        birthplace: person
            .and_then(|p| p.birthplace.clone())
            .unwrap_or_default(),
        education: person
            .and_then(|p| p.education.clone())
            .unwrap_or_default(),
        school: person
            .and_then(|p| p.school.clone())
            .unwrap_or_default(),
        birthday: person
            .and_then(|p| p.birthday.clone())
            .unwrap_or_default(),
    }
}

/// Flatten an accumulated sequence in order, one row per record.
pub fn flatten_all(records: &[RawRecord]) -> Vec<FlatRow> {
    records.iter().map(flatten).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record_with_person() -> RawRecord {
        serde_json::from_value(json!({
            "hs_Rank_Rich_Ranking": 1,
            "hs_Rank_Rich_ChaName_Cn": "钟睒睒",
            "hs_Rank_Rich_Wealth": 4500,
            "hs_Rank_Rich_Wealth_Change": "-24%",
            "hs_Rank_Rich_ComName_Cn": "农夫山泉",
            "hs_Rank_Rich_Industry_Cn": "食品饮料",
            "hs_Rank_Rich_ComHeadquarters_Cn": "杭州",
            "hs_Character": [{
                "hs_Character_Gender": "先生",
                "hs_Character_Age": "69",
                "hs_Character_BirthPlace_Cn": "中国-浙江-杭州",
                "hs_Character_Education_Cn": "本科",
                "hs_Character_School_Cn": "电大",
                "hs_Character_Birthday": "1954-12-01"
            }]
        }))
        .unwrap()
    }

    #[test]
    fn flatten_takes_first_person_fields() {
        let row = flatten(&record_with_person());
        assert_eq!(row.rank, "1");
        assert_eq!(row.name, "钟睒睒");
        assert_eq!(row.wealth, Some(4500.0));
        assert_eq!(row.gender, "先生");
        assert_eq!(row.age, Some(69.0));
        assert_eq!(row.birthplace, "中国-浙江-杭州");
        assert_eq!(row.birthday, "1954-12-01");
    }

    #[test]
    fn flatten_without_person_yields_empty_strings_and_null_age() {
        let record: RawRecord = serde_json::from_value(json!({
            "hs_Rank_Rich_Ranking": "2",
            "hs_Rank_Rich_ChaName_Cn": "张一鸣",
            "hs_Rank_Rich_Wealth": "3500",
            "hs_Character": []
        }))
        .unwrap();
        let row = flatten(&record);
        assert_eq!(row.rank, "2");
        assert_eq!(row.wealth, Some(3500.0));
        assert_eq!(row.gender, "");
        assert_eq!(row.birthplace, "");
        assert_eq!(row.education, "");
        assert_eq!(row.school, "");
        assert_eq!(row.birthday, "");
        assert_eq!(row.age, None);
    }

    #[test]
    fn absent_character_key_behaves_like_empty_list() {
        let record: RawRecord =
            serde_json::from_value(json!({ "hs_Rank_Rich_ChaName_Cn": "某人" })).unwrap();
        let row = flatten(&record);
        assert_eq!(row.gender, "");
        assert_eq!(row.age, None);
    }

    #[test]
    fn coerce_handles_number_string_and_garbage() {
        assert_eq!(coerce_numeric(Some(&json!(12.5))), Some(12.5));
        assert_eq!(coerce_numeric(Some(&json!("12.5"))), Some(12.5));
        assert_eq!(coerce_numeric(Some(&json!(" 70 "))), Some(70.0));
        assert_eq!(coerce_numeric(Some(&json!("--"))), None);
        assert_eq!(coerce_numeric(Some(&json!(null))), None);
        assert_eq!(coerce_numeric(None), None);
    }

    #[test]
    fn flatten_all_preserves_cardinality_and_order() {
        let mut second = record_with_person();
        second.ranking = Some(json!(2));
        let rows = flatten_all(&[record_with_person(), second]);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].rank, "1");
        assert_eq!(rows[1].rank, "2");
    }

    #[test]
    fn unknown_wire_fields_are_ignored() {
        let page: RankPage = serde_json::from_value(json!({
            "rows": [{ "hs_Rank_Rich_ChaName_Cn": "某人", "hs_Extra": {"x": 1} }],
            "total": 1,
            "code": 200
        }))
        .unwrap();
        assert_eq!(page.rows.len(), 1);
        assert_eq!(page.total, 1);
    }
}
