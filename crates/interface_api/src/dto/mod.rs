//! Request and response data transfer objects

pub mod calculators;
pub mod schemes;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use validator::ValidationError;

/// Highest annual rate, in percent, accepted by the calculators
pub const MAX_RATE_PERCENT: Decimal = dec!(100);
/// Highest annual step-up, in percent
pub const MAX_STEP_UP_PERCENT: Decimal = dec!(100);

/// Annual rates must lie in `(-100, 100]`
pub fn validate_rate(rate: &Decimal) -> Result<(), ValidationError> {
    if *rate <= dec!(-100) || *rate > MAX_RATE_PERCENT {
        return Err(ValidationError::new("rate_out_of_range"));
    }
    Ok(())
}

/// Step-ups must lie in `[0, 100]`
pub fn validate_step_up(percent: &Decimal) -> Result<(), ValidationError> {
    if (percent.is_sign_negative() && !percent.is_zero()) || *percent > MAX_STEP_UP_PERCENT {
        return Err(ValidationError::new("step_up_out_of_range"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_bounds() {
        assert!(validate_rate(&dec!(12)).is_ok());
        assert!(validate_rate(&dec!(-99.5)).is_ok());
        assert!(validate_rate(&dec!(-100)).is_err());
        assert!(validate_rate(&dec!(1000)).is_err());
    }

    #[test]
    fn test_step_up_bounds() {
        assert!(validate_step_up(&Decimal::ZERO).is_ok());
        assert!(validate_step_up(&dec!(100)).is_ok());
        assert!(validate_step_up(&dec!(-1)).is_err());
        assert!(validate_step_up(&dec!(1000)).is_err());
    }
}
