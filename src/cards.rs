//! Card brand classification from the account number

use std::{collections::HashMap, sync::LazyLock};

use error_stack::ResultExt;
use regex::Regex;

use crate::errors::{ConnectorError, CustomResult};

/// Card brands the classifier can recognize
#[derive(Debug, Copy, Clone, strum::Display, Eq, Hash, PartialEq)]
pub enum CardIssuer {
    AmericanExpress,
    Master,
    Maestro,
    Visa,
    Discover,
    DinersClub,
    JCB,
    UnionPay,
    CarteBlanche,
}

static CARD_REGEX: LazyLock<HashMap<CardIssuer, Result<Regex, regex::Error>>> =
    LazyLock::new(|| {
        let mut map = HashMap::new();
        // Reference: https://gist.github.com/michaelkeevildown/9096cd3aac9029c4e6e05588448a8841
        map.insert(CardIssuer::Master, Regex::new(r"^5[1-5][0-9]{14}$"));
        map.insert(CardIssuer::AmericanExpress, Regex::new(r"^3[47][0-9]{13}$"));
        map.insert(CardIssuer::Visa, Regex::new(r"^4[0-9]{12}(?:[0-9]{3})?$"));
        map.insert(CardIssuer::Discover, Regex::new(r"^65[4-9][0-9]{13}|64[4-9][0-9]{13}|6011[0-9]{12}|(622(?:12[6-9]|1[3-9][0-9]|[2-8][0-9][0-9]|9[01][0-9]|92[0-5])[0-9]{10})$"));
        map.insert(
            CardIssuer::Maestro,
            Regex::new(r"^(5018|5020|5038|5893|6304|6759|6761|6762|6763)[0-9]{8,15}$"),
        );
        map.insert(
            CardIssuer::DinersClub,
            Regex::new(r"^3(?:0[0-5]|[68][0-9])[0-9]{11}$"),
        );
        map.insert(
            CardIssuer::JCB,
            Regex::new(r"^(3(?:088|096|112|158|337|5(?:2[89]|[3-8][0-9]))\d{12})$"),
        );
        map.insert(CardIssuer::UnionPay, Regex::new(r"^62[0-9]{14,17}$"));
        map.insert(CardIssuer::CarteBlanche, Regex::new(r"^389[0-9]{11}$"));
        map
    });

/// Classifies a card number into its issuing brand
pub fn get_card_issuer(card_number: &str) -> CustomResult<CardIssuer, ConnectorError> {
    for (issuer, pattern) in CARD_REGEX.iter() {
        let regex: Regex = pattern
            .clone()
            .change_context(ConnectorError::RequestEncodingFailed)?;
        if regex.is_match(card_number) {
            return Ok(*issuer);
        }
    }
    Err(error_stack::Report::new(ConnectorError::NotSupported {
        message: "Card type".to_string(),
        connector: "litle",
    }))
}
