use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdvertType {
    #[default]
    #[serde(rename = "CFP")]
    Cfp,
    #[serde(rename = "book")]
    Book,
    #[serde(rename = "journal")]
    Journal,
    #[serde(rename = "conference")]
    Conference,
}

/// Promotion tier. Affects display styling only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromoLevel {
    #[default]
    Free,
    Featured,
    EmailBlast,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Advert {
    pub id: String,
    pub creator: String,
    pub advert_type: AdvertType,
    pub title: String,
    pub content: String,
    pub promo_level: PromoLevel,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewAdvert {
    pub creator: String,
    #[serde(default)]
    pub advert_type: AdvertType,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub promo_level: PromoLevel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advert_wire_names() {
        assert_eq!(serde_json::to_string(&AdvertType::Cfp).unwrap(), "\"CFP\"");
        assert_eq!(
            serde_json::to_string(&PromoLevel::EmailBlast).unwrap(),
            "\"email_blast\""
        );
    }

    #[test]
    fn test_new_advert_defaults() {
        let ad: NewAdvert = serde_json::from_str(
            r#"{"creator":"Press","title":"New Issue","content":"Out now"}"#,
        )
        .unwrap();
        assert_eq!(ad.advert_type, AdvertType::Cfp);
        assert_eq!(ad.promo_level, PromoLevel::Free);
    }
}
