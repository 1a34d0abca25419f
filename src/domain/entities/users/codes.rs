//! 닫힌 열거형 코드 테이블
//!
//! 호칭(salutation), 학위/직함(title), ISO-3166 alpha-2 국가 코드처럼
//! 허용 값이 고정된 필드의 정규 조회 테이블입니다.
//! 검증 로직은 문자열 비교 대신 항상 이 모듈의 `from_code` / `is_iso_alpha2`를 사용합니다.

use serde::{Deserialize, Serialize};

/// 호칭
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Salutation {
    #[serde(rename = "SALUTATION_MALE")]
    Male,
    #[serde(rename = "SALUTATION_FEMALE")]
    Female,
    #[serde(rename = "SALUTATION_FEMALE_MARRIED")]
    FemaleMarried,
    #[serde(rename = "SALUTATION_DIVERSE")]
    Diverse,
}

impl Salutation {
    pub const ALL: [Salutation; 4] = [
        Salutation::Male,
        Salutation::Female,
        Salutation::FemaleMarried,
        Salutation::Diverse,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Salutation::Male => "SALUTATION_MALE",
            Salutation::Female => "SALUTATION_FEMALE",
            Salutation::FemaleMarried => "SALUTATION_FEMALE_MARRIED",
            Salutation::Diverse => "SALUTATION_DIVERSE",
        }
    }

    /// 와이어 코드에서 호칭을 찾습니다. 대소문자를 구분합니다.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == code)
    }
}

/// 학위/직함
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Title {
    Dr,
    Prof,
    ProfDr,
    DiplIng,
    Magister,
}

impl Title {
    pub const ALL: [Title; 5] = [Title::Dr, Title::Prof, Title::ProfDr, Title::DiplIng, Title::Magister];

    pub fn as_str(&self) -> &'static str {
        match self {
            Title::Dr => "DR",
            Title::Prof => "PROF",
            Title::ProfDr => "PROF_DR",
            Title::DiplIng => "DIPL_ING",
            Title::Magister => "MAGISTER",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == code)
    }
}

/// ISO 3166-1 alpha-2 국가 코드 (XK 포함), 이진 탐색을 위해 정렬된 상태를 유지해야 합니다.
pub static ISO_ALPHA2_CODES: &[&str] = &[
    "AD", "AE", "AF", "AG", "AI", "AL", "AM", "AO", "AQ", "AR",
    "AS", "AT", "AU", "AW", "AX", "AZ", "BA", "BB", "BD", "BE",
    "BF", "BG", "BH", "BI", "BJ", "BL", "BM", "BN", "BO", "BQ",
    "BR", "BS", "BT", "BV", "BW", "BY", "BZ", "CA", "CC", "CD",
    "CF", "CG", "CH", "CI", "CK", "CL", "CM", "CN", "CO", "CR",
    "CU", "CV", "CW", "CX", "CY", "CZ", "DE", "DJ", "DK", "DM",
    "DO", "DZ", "EC", "EE", "EG", "EH", "ER", "ES", "ET", "FI",
    "FJ", "FK", "FM", "FO", "FR", "GA", "GB", "GD", "GE", "GF",
    "GG", "GH", "GI", "GL", "GM", "GN", "GP", "GQ", "GR", "GS",
    "GT", "GU", "GW", "GY", "HK", "HM", "HN", "HR", "HT", "HU",
    "ID", "IE", "IL", "IM", "IN", "IO", "IQ", "IR", "IS", "IT",
    "JE", "JM", "JO", "JP", "KE", "KG", "KH", "KI", "KM", "KN",
    "KP", "KR", "KW", "KY", "KZ", "LA", "LB", "LC", "LI", "LK",
    "LR", "LS", "LT", "LU", "LV", "LY", "MA", "MC", "MD", "ME",
    "MF", "MG", "MH", "MK", "ML", "MM", "MN", "MO", "MP", "MQ",
    "MR", "MS", "MT", "MU", "MV", "MW", "MX", "MY", "MZ", "NA",
    "NC", "NE", "NF", "NG", "NI", "NL", "NO", "NP", "NR", "NU",
    "NZ", "OM", "PA", "PE", "PF", "PG", "PH", "PK", "PL", "PM",
    "PN", "PR", "PS", "PT", "PW", "PY", "QA", "RE", "RO", "RS",
    "RU", "RW", "SA", "SB", "SC", "SD", "SE", "SG", "SH", "SI",
    "SJ", "SK", "SL", "SM", "SN", "SO", "SR", "SS", "ST", "SV",
    "SX", "SY", "SZ", "TC", "TD", "TF", "TG", "TH", "TJ", "TK",
    "TL", "TM", "TN", "TO", "TR", "TT", "TV", "TW", "TZ", "UA",
    "UG", "UM", "US", "UY", "UZ", "VA", "VC", "VE", "VG", "VI",
    "VN", "VU", "WF", "WS", "XK", "YE", "YT", "ZA", "ZM", "ZW",
];

/// 대문자 ISO alpha-2 코드인지 확인합니다. ("de"는 허용하지 않습니다)
pub fn is_iso_alpha2(code: &str) -> bool {
    ISO_ALPHA2_CODES.binary_search(&code).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iso_table_is_sorted_and_unique() {
        assert!(ISO_ALPHA2_CODES.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(ISO_ALPHA2_CODES.len(), 250);
    }

    #[test]
    fn test_iso_lookup() {
        assert!(is_iso_alpha2("DE"));
        assert!(is_iso_alpha2("XK"));
        assert!(!is_iso_alpha2("de"));
        assert!(!is_iso_alpha2("XX"));
        assert!(!is_iso_alpha2(""));
    }

    #[test]
    fn test_salutation_codes_round_trip() {
        for s in Salutation::ALL {
            assert_eq!(Salutation::from_code(s.as_str()), Some(s));
        }
        assert_eq!(Salutation::from_code("salutation_male"), None);
        assert_eq!(Salutation::from_code("MR"), None);
    }

    #[test]
    fn test_title_codes_round_trip() {
        for t in Title::ALL {
            assert_eq!(Title::from_code(t.as_str()), Some(t));
        }
        assert_eq!(
            serde_json::to_string(&Title::ProfDr).unwrap(),
            "\"PROF_DR\""
        );
        assert_eq!(Title::from_code("PHD"), None);
    }
}
