//! Payment-intent collaborator. One call per checkout: forward the amount,
//! hand the returned client secret back to the caller.

use serde::Deserialize;

use crate::{error::AppError, state::AppState};

const PAYMENT_INTENTS_URL: &str = "https://api.stripe.com/v1/payment_intents";

#[derive(Debug, Deserialize)]
pub struct PaymentIntent {
    pub id: String,
    pub client_secret: String,
}

/// Prices arrive as major units (dollars); the collaborator bills in minor
/// units (cents).
pub fn to_minor_units(price: f64) -> Option<i64> {
    if !price.is_finite() || price <= 0.0 {
        return None;
    }

    Some((price * 100.0).round() as i64)
}

pub async fn create_intent(state: &AppState, price: f64) -> Result<PaymentIntent, AppError> {
    let amount = to_minor_units(price)
        .ok_or_else(|| AppError::Validation("price must be a positive amount".to_string()))?;

    let response = state
        .http
        .post(PAYMENT_INTENTS_URL)
        .bearer_auth(&state.config.stripe_secret_key)
        .form(&[
            ("amount", amount.to_string()),
            ("currency", "usd".to_string()),
            ("payment_method_types[]", "card".to_string()),
        ])
        .send()
        .await?
        .error_for_status()?;

    Ok(response.json().await?)
}

#[cfg(test)]
mod tests {
    use super::to_minor_units;

    #[test]
    fn test_whole_and_fractional_prices() {
        assert_eq!(to_minor_units(30.0), Some(3000));
        assert_eq!(to_minor_units(19.99), Some(1999));
        assert_eq!(to_minor_units(0.01), Some(1));
    }

    #[test]
    fn test_invalid_prices_rejected() {
        assert_eq!(to_minor_units(0.0), None);
        assert_eq!(to_minor_units(-5.0), None);
        assert_eq!(to_minor_units(f64::NAN), None);
        assert_eq!(to_minor_units(f64::INFINITY), None);
    }
}
