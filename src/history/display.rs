//! Date, age and summary helpers for the history pages

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Timelike};
use std::collections::BTreeSet;

use crate::api::Diagnosis;

const MONTHS: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

/// Whole years between `birth` and `today`
pub fn age_on(birth: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    age
}

/// Age for a birth date as the API sends it
pub fn age_from_str(birth_date: &str, today: NaiveDate) -> Option<i32> {
    parse_api_date(birth_date).map(|dt| age_on(dt.date(), today))
}

/// Parse the date formats the API uses. Time zones are dropped after
/// conversion to UTC.
pub fn parse_api_date(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

fn plural(n: i64, singular: &str, plural: &str) -> String {
    format!("Hace {} {}", n, if n > 1 { plural } else { singular })
}

/// Relative label for an age in whole days. Future dates count as today.
pub fn time_ago_days(days: i64) -> String {
    match days.max(0) {
        0 => "Hoy".to_string(),
        1 => "Ayer".to_string(),
        d if d < 7 => format!("Hace {} días", d),
        d if d < 30 => plural(d / 7, "semana", "semanas"),
        d if d < 365 => plural(d / 30, "mes", "meses"),
        d => plural(d / 365, "año", "años"),
    }
}

pub fn time_ago(then: NaiveDateTime, now: NaiveDateTime) -> String {
    time_ago_days((now - then).num_days())
}

/// `None` when the date cannot be parsed
pub fn time_ago_str(raw: &str, now: NaiveDateTime) -> Option<String> {
    parse_api_date(raw).map(|then| time_ago(then, now))
}

/// `"5 de marzo de 2024"`
pub fn format_date(date: NaiveDate) -> String {
    format!(
        "{} de {} de {}",
        date.day(),
        MONTHS[date.month0() as usize],
        date.year()
    )
}

/// `"5 de marzo de 2024, 14:05"`
pub fn format_datetime(dt: NaiveDateTime) -> String {
    format!(
        "{}, {:02}:{:02}",
        format_date(dt.date()),
        dt.hour(),
        dt.minute()
    )
}

/// Long-form date, or the raw text when it does not parse
pub fn format_api_date(raw: &str) -> String {
    parse_api_date(raw)
        .map(|dt| format_date(dt.date()))
        .unwrap_or_else(|| raw.to_string())
}

pub fn format_api_datetime(raw: &str) -> String {
    parse_api_date(raw)
        .map(format_datetime)
        .unwrap_or_else(|| raw.to_string())
}

/// Quick stats over a diagnosis list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosisSummary {
    pub total: usize,
    /// Most recent diagnosis date that parses
    pub latest: Option<NaiveDateTime>,
    pub distinct_doctors: usize,
    /// Diagnoses grouped by the treating doctor's specialty, first seen first
    pub by_specialty: Vec<SpecialtyShare>,
}

/// One row of the per-specialty breakdown
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecialtyShare {
    pub specialty: String,
    pub count: usize,
    /// Rounded share of all diagnoses
    pub percent: u32,
}

impl SpecialtyShare {
    /// "1 consulta" / "3 consultas"
    pub fn count_label(&self) -> String {
        format!("{} consulta{}", self.count, if self.count == 1 { "" } else { "s" })
    }
}

// Diagnoses without an embedded doctor are left out of the breakdown
fn specialty_shares(diagnoses: &[Diagnosis]) -> Vec<SpecialtyShare> {
    let mut shares: Vec<SpecialtyShare> = Vec::new();
    for doctor in diagnoses.iter().filter_map(|d| d.doctor.as_ref()) {
        match shares.iter_mut().find(|s| s.specialty == doctor.specialty) {
            Some(share) => share.count += 1,
            None => shares.push(SpecialtyShare {
                specialty: doctor.specialty.clone(),
                count: 1,
                percent: 0,
            }),
        }
    }

    let total = diagnoses.len().max(1) as f64;
    for share in &mut shares {
        share.percent = (share.count as f64 * 100.0 / total).round() as u32;
    }
    shares
}

impl DiagnosisSummary {
    pub fn from_diagnoses(diagnoses: &[Diagnosis]) -> Self {
        let latest = diagnoses
            .iter()
            .filter_map(|d| parse_api_date(&d.diagnosis_date))
            .max();

        let doctors: BTreeSet<String> = diagnoses
            .iter()
            .filter_map(|d| {
                d.doctor_id
                    .as_ref()
                    .map(|id| id.to_string())
                    .or_else(|| d.doctor.as_ref().map(|doc| doc.id.to_string()))
            })
            .collect();

        Self {
            total: diagnoses.len(),
            latest,
            distinct_doctors: doctors.len(),
            by_specialty: specialty_shares(diagnoses),
        }
    }

    /// "Última consulta" label, `"N/A"` when there is none
    pub fn last_visit_label(&self, now: NaiveDateTime) -> String {
        self.latest
            .map(|dt| time_ago(dt, now))
            .unwrap_or_else(|| "N/A".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveTime};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn diagnosis(id: i64, date: &str, doctor: Option<&str>) -> Diagnosis {
        Diagnosis {
            id,
            description: "x".into(),
            diagnosis_date: date.into(),
            history_id: None,
            doctor_id: doctor.map(crate::api::RecordId::new),
            doctor: None,
        }
    }

    #[test]
    fn test_age_before_birthday_is_one_less() {
        let today = date(2024, 6, 15);
        for years in [1, 18, 45, 80] {
            let birth = date(2024 - years, 6, 16);
            assert_eq!(age_on(birth, today), years - 1);
            let birth = date(2024 - years, 6, 15);
            assert_eq!(age_on(birth, today), years);
        }
    }

    #[test]
    fn test_age_from_api_string() {
        assert_eq!(age_from_str("1980-05-10", date(2024, 5, 9)), Some(43));
        assert_eq!(age_from_str("not a date", date(2024, 5, 9)), None);
    }

    #[test]
    fn test_parse_api_date_formats() {
        let expected = date(2024, 3, 5).and_hms_opt(14, 5, 0).unwrap();
        assert_eq!(parse_api_date("2024-03-05T14:05:00.000000Z"), Some(expected));
        assert_eq!(parse_api_date("2024-03-05 14:05:00"), Some(expected));
        assert_eq!(
            parse_api_date("2024-03-05"),
            Some(date(2024, 3, 5).and_time(NaiveTime::MIN))
        );
    }

    #[test]
    fn test_time_ago_buckets() {
        let cases = [
            (0, "Hoy"),
            (1, "Ayer"),
            (3, "Hace 3 días"),
            (7, "Hace 1 semana"),
            (20, "Hace 2 semanas"),
            (30, "Hace 1 mes"),
            (200, "Hace 6 meses"),
            (365, "Hace 1 año"),
            (1000, "Hace 2 años"),
            (-4, "Hoy"),
        ];
        for (days, label) in cases {
            assert_eq!(time_ago_days(days), label, "days = {}", days);
        }
    }

    #[test]
    fn test_time_ago_partial_day_is_today() {
        let now = date(2024, 3, 5).and_hms_opt(10, 0, 0).unwrap();
        assert_eq!(time_ago(now - Duration::hours(23), now), "Hoy");
        assert_eq!(time_ago_str("2024-03-04", now).as_deref(), Some("Ayer"));
    }

    #[test]
    fn test_spanish_long_dates() {
        assert_eq!(format_date(date(2024, 3, 5)), "5 de marzo de 2024");
        assert_eq!(
            format_datetime(date(2023, 12, 31).and_hms_opt(9, 7, 0).unwrap()),
            "31 de diciembre de 2023, 09:07"
        );
        assert_eq!(format_api_date("ayer"), "ayer");
    }

    #[test]
    fn test_summary_counts() {
        let list = vec![
            diagnosis(1, "2024-01-10", Some("2")),
            diagnosis(2, "2024-03-05", Some("2")),
            diagnosis(3, "2023-11-01", Some("4")),
        ];
        let summary = DiagnosisSummary::from_diagnoses(&list);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.distinct_doctors, 2);
        assert_eq!(summary.latest.unwrap().date(), date(2024, 3, 5));

        assert!(summary.by_specialty.is_empty());

        let empty = DiagnosisSummary::from_diagnoses(&[]);
        assert_eq!(empty.last_visit_label(date(2024, 1, 1).and_time(NaiveTime::MIN)), "N/A");
    }

    #[test]
    fn test_specialty_breakdown() {
        let doctor = |id, specialty: &str| crate::api::Doctor {
            id,
            cmp: format!("CMP-{}", id),
            specialty: specialty.into(),
            user_id: None,
        };
        let mut list = vec![
            diagnosis(1, "2024-01-10", None),
            diagnosis(2, "2024-02-10", None),
            diagnosis(3, "2024-03-10", None),
        ];
        list[0].doctor = Some(doctor(2, "Oftalmología"));
        list[1].doctor = Some(doctor(4, "Retina"));
        list[2].doctor = Some(doctor(2, "Oftalmología"));

        let summary = DiagnosisSummary::from_diagnoses(&list);
        assert_eq!(summary.distinct_doctors, 2);
        assert_eq!(summary.by_specialty.len(), 2);
        assert_eq!(summary.by_specialty[0].specialty, "Oftalmología");
        assert_eq!(summary.by_specialty[0].percent, 67);
        assert_eq!(summary.by_specialty[0].count_label(), "2 consultas");
        assert_eq!(summary.by_specialty[1].count_label(), "1 consulta");
    }
}
