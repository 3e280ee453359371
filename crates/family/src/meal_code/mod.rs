//! Sixteen character meal codes.
//!
//! Layout: the first eight characters of the family id right padded with
//! `0`, the meal date as `YYMMDD`, then the participant count on two digits.

mod command;
mod query;

pub use command::*;
pub use query::*;

use time::{Date, Month};

pub const CODE_LEN: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedMealCode {
    pub family_id: String,
    pub meal_date: Date,
    pub participant_count: u32,
}

pub fn encode(family_id: &str, participant_count: u32, meal_date: Date) -> String {
    let mut family_part: String = family_id.chars().take(8).collect();
    while family_part.chars().count() < 8 {
        family_part.push('0');
    }

    format!(
        "{family_part}{:02}{:02}{:02}{:02}",
        meal_date.year().rem_euclid(100),
        u8::from(meal_date.month()),
        meal_date.day(),
        participant_count.min(99)
    )
}

/// Sixteen characters drawn from the family id alphabet.
pub fn is_valid(code: &str) -> bool {
    code.len() == CODE_LEN && code.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

pub fn decode(code: &str) -> meal_planner_shared::Result<DecodedMealCode> {
    if !is_valid(code) {
        meal_planner_shared::user!("Invalid meal code format");
    }

    let family_id = code[..8].trim_end_matches('0').to_owned();

    let (Ok(year), Ok(month), Ok(day), Ok(participant_count)) = (
        code[8..10].parse::<i32>(),
        code[10..12].parse::<u8>(),
        code[12..14].parse::<u8>(),
        code[14..16].parse::<u32>(),
    ) else {
        meal_planner_shared::user!("Invalid date in meal code");
    };

    let Some(meal_date) = Month::try_from(month)
        .ok()
        .and_then(|month| Date::from_calendar_date(2000 + year, month, day).ok())
    else {
        meal_planner_shared::user!("Invalid date in meal code");
    };

    Ok(DecodedMealCode {
        family_id,
        meal_date,
        participant_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn encode_pads_family_and_count() {
        assert_eq!(encode("FAM1", 3, date!(2025 - 07 - 04)), "FAM1000025070403");
        assert_eq!(
            encode("LONGFAMILYID", 120, date!(2031 - 12 - 31)),
            "LONGFAMI31123199"
        );
    }

    #[test]
    fn decode_strips_padding() {
        let decoded = decode("FAM1000025070403").unwrap();

        assert_eq!(
            decoded,
            DecodedMealCode {
                family_id: "FAM1".to_owned(),
                meal_date: date!(2025 - 07 - 04),
                participant_count: 3,
            }
        );
    }

    #[test]
    fn decode_rejects_bad_codes() {
        assert!(decode("SHORT").is_err());
        assert!(decode("FAM10000251304 3").is_err());
        assert_eq!(
            decode("FAM1000025133103").unwrap_err().to_string(),
            "Invalid date in meal code"
        );
        assert!(decode("FAM1000025023003").is_err());
    }

    #[test]
    fn validity() {
        assert!(is_valid("ABCD000025070403"));
        assert!(is_valid("fam_100099010204"));
        assert!(!is_valid("ABCD-00025070403"));
        assert!(!is_valid("ABCD00002507040"));
    }
}
