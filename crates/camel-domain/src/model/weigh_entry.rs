use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::Rate;
use crate::service::weight_calculator::{format_number, recompute_net, recompute_price};

/// Validated user input for one weighing, before identity is assigned
#[derive(Debug, Clone, PartialEq)]
pub struct WeighDetails {
    pub plate_number: String,
    pub gross_weight: f64,
    pub tare_weight: f64,
    pub date: NaiveDate,
    pub rate: Rate,
}

/// One completed weigh-station transaction
///
/// Field names follow the station's stored JSON layout
/// (`yukBilan` = gross, `yuksiz` = tare, `sofVazin` = net).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeighEntry {
    pub id: String,
    pub check_no: u64,
    pub plate_number: String,
    #[serde(rename = "yukBilan")]
    pub gross_weight: f64,
    #[serde(rename = "yuksiz")]
    pub tare_weight: f64,
    #[serde(rename = "sofVazin")]
    pub net_weight: f64,
    pub date: NaiveDate,
    pub rate: Rate,
    pub price: f64,
}

impl WeighEntry {
    /// Build a new entry; net weight and price are derived here
    pub fn create(id: String, check_no: u64, details: WeighDetails) -> Self {
        let net_weight = recompute_net(details.gross_weight, details.tare_weight);
        Self {
            id,
            check_no,
            plate_number: details.plate_number.trim().to_string(),
            gross_weight: details.gross_weight,
            tare_weight: details.tare_weight,
            net_weight,
            date: details.date,
            rate: details.rate,
            price: recompute_price(net_weight, details.rate),
        }
    }

    /// Replace every editable field, keeping `id` and `check_no`
    pub fn apply(&mut self, details: WeighDetails) {
        let id = std::mem::take(&mut self.id);
        *self = Self::create(id, self.check_no, details);
    }

    /// Text form of every stored field, in storage order
    pub fn field_texts(&self) -> [String; 9] {
        [
            self.id.clone(),
            self.check_no.to_string(),
            self.plate_number.clone(),
            format_number(self.gross_weight),
            format_number(self.tare_weight),
            format_number(self.net_weight),
            self.date.to_string(),
            self.rate.to_string(),
            format_number(self.price),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details(plate: &str, gross: f64, tare: f64, rate: Rate) -> WeighDetails {
        WeighDetails {
            plate_number: plate.to_string(),
            gross_weight: gross,
            tare_weight: tare,
            date: NaiveDate::from_ymd_opt(2026, 10, 18).unwrap(),
            rate,
        }
    }

    #[test]
    fn test_create_derives_net_and_price() {
        let entry = WeighEntry::create(
            "a".to_string(),
            1,
            details("01 A 234 BC", 42000.0, 12000.0, Rate::Standard),
        );
        assert_eq!(entry.net_weight, 30000.0);
        assert_eq!(entry.price, 900_000_000.0);
    }

    #[test]
    fn test_create_trims_plate() {
        let entry = WeighEntry::create(
            "a".to_string(),
            1,
            details("  01 A 234 BC \t", 1.0, 0.0, Rate::Standard),
        );
        assert_eq!(entry.plate_number, "01 A 234 BC");
    }

    #[test]
    fn test_apply_keeps_identity() {
        let mut entry = WeighEntry::create(
            "keep-me".to_string(),
            7,
            details("X", 42000.0, 12000.0, Rate::Standard),
        );
        entry.apply(details("Y", 20000.0, 5000.0, Rate::Premium));
        assert_eq!(entry.id, "keep-me");
        assert_eq!(entry.check_no, 7);
        assert_eq!(entry.plate_number, "Y");
        assert_eq!(entry.net_weight, 15000.0);
        assert_eq!(entry.price, 600_000_000.0);
    }

    #[test]
    fn test_serialized_field_names() {
        let entry = WeighEntry::create(
            "id-1".to_string(),
            3,
            details("P", 42000.0, 12000.0, Rate::Standard),
        );
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["checkNo"], 3);
        assert_eq!(value["plateNumber"], "P");
        assert_eq!(value["yukBilan"], 42000.0);
        assert_eq!(value["yuksiz"], 12000.0);
        assert_eq!(value["sofVazin"], 30000.0);
        assert_eq!(value["date"], "2026-10-18");
        assert_eq!(value["rate"], 30000);
    }

    #[test]
    fn test_reads_integer_weights() {
        let json = r#"{"id":"u1","checkNo":12,"plateNumber":"01 A 234 BC","yukBilan":42000,
            "yuksiz":12000,"sofVazin":30000,"date":"2025-01-05","rate":40000,"price":1200000000}"#;
        let entry: WeighEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.check_no, 12);
        assert_eq!(entry.rate, Rate::Premium);
        assert_eq!(entry.price, 1_200_000_000.0);
    }

    #[test]
    fn test_field_texts() {
        let entry = WeighEntry::create(
            "id-1".to_string(),
            3,
            details("P", 42000.0, 12000.0, Rate::Standard),
        );
        let texts = entry.field_texts();
        assert_eq!(texts[1], "3");
        assert_eq!(texts[3], "42000");
        assert_eq!(texts[6], "2026-10-18");
        assert_eq!(texts[7], "30000");
        assert_eq!(texts[8], "900000000");
    }
}
