#![forbid(unsafe_code)]
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR" ), "/", "README.md"))]

pub mod enums;

pub use enums::*;

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::str::FromStr;

    use strum::IntoEnumIterator;
    use test_case::test_case;

    use super::*;

    #[test_case(CountryCode::AF, "af" ; "country codes are lowercase")]
    #[test_case(CountryCode::GB, "gb" ; "united kingdom")]
    fn test_country_wire_name(country: CountryCode, wire: &str) {
        assert_eq!(country.as_ref(), wire);
        assert_eq!(serde_json::to_string(&country).unwrap(), format!("\"{wire}\""));
        assert_eq!(CountryCode::from_str(wire).unwrap(), country);
    }

    #[test_case(IntentStatus::RequiresCustomerAction, "requires_customer_action")]
    #[test_case(IntentStatus::PartiallyCapturedAndCapturable, "partially_captured_and_capturable")]
    #[test_case(DisputeStatus::DisputeOpened, "dispute_opened")]
    #[test_case(SubscriptionStatus::OnHold, "on_hold")]
    #[test_case(Currency::USD, "USD")]
    #[test_case(TimeInterval::Month, "Month")]
    #[test_case(PaymentMethodType::AfterpayClearpay, "afterpay_clearpay")]
    fn test_wire_names<E>(member: E, wire: &str)
    where
        E: AsRef<str> + serde::Serialize,
    {
        assert_eq!(member.as_ref(), wire);
        assert_eq!(serde_json::to_value(&member).unwrap(), wire);
    }

    #[test]
    fn test_serde_and_strum_agree() {
        assert_eq!(CountryCode::iter().count(), 249);
        for country in CountryCode::iter() {
            let serialized = serde_json::to_value(country).unwrap();
            assert_eq!(serialized, country.as_ref());
        }
        for currency in Currency::iter() {
            assert_eq!(Currency::from_str(currency.as_ref()).unwrap(), currency);
        }
        assert_eq!(Currency::default(), Currency::USD);
    }
}
