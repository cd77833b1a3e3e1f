use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::domain::payment::{CreatePaymentRequest, Currency, PaymentMethod};
use crate::domain::transaction::RefundRequest;
use crate::error::PaymentError;

pub const MIN_AMOUNT: Decimal = dec!(0.01);
pub const MAX_AMOUNT: Decimal = dec!(999999.99);
pub const MAX_ID_LENGTH: usize = 255;
pub const MAX_TEXT_LENGTH: usize = 1000;

#[derive(Debug, Clone)]
pub struct NewPayment {
    pub merchant_id: String,
    pub customer_id: String,
    pub amount: Decimal,
    pub currency: Currency,
    pub payment_method: PaymentMethod,
    pub description: Option<String>,
    pub card_last_four: Option<String>,
    pub card_type: Option<String>,
}

// Collects every field error in one pass so a bad request reports all of
// its problems at once.
pub fn validate_create(request: &CreatePaymentRequest) -> Result<NewPayment, PaymentError> {
    let mut errors = Vec::new();

    let merchant_id = required_id("merchant_id", request.merchant_id.as_deref(), &mut errors);
    let customer_id = required_id("customer_id", request.customer_id.as_deref(), &mut errors);

    let payment_method = match non_empty(request.payment_method.as_deref()) {
        Some(value) => match PaymentMethod::parse(value) {
            Some(method) => Some(method),
            None => {
                errors.push(format!("Invalid payment method: {value}"));
                None
            }
        },
        None => {
            errors.push("payment_method is required".to_string());
            None
        }
    };

    let currency = match non_empty(request.currency.as_deref()) {
        Some(code) => match Currency::parse(code) {
            Some(currency) => Some(currency),
            None => {
                errors.push(format!("Currency {code} not supported"));
                None
            }
        },
        None => Some(Currency::Usd),
    };

    let amount = check_amount(request.amount, currency, &mut errors);

    if let Some(method) = payment_method {
        let has_card_fields = request.card_last_four.is_some() || request.card_type.is_some();
        if has_card_fields && !method.accepts_card_details() {
            errors.push(format!(
                "Card details are not allowed for payment method {}",
                method.as_str()
            ));
        } else if let Some(last_four) = request.card_last_four.as_deref() {
            if last_four.len() != 4 || !last_four.bytes().all(|b| b.is_ascii_digit()) {
                errors.push("card_last_four must be exactly 4 digits".to_string());
            }
        }
    }

    let description = match request.description.as_deref() {
        Some(text) if text.len() > MAX_TEXT_LENGTH => {
            errors.push(format!("description must not exceed {MAX_TEXT_LENGTH} characters"));
            None
        }
        Some(text) => Some(sanitize_text(text)),
        None => None,
    };

    match (merchant_id, customer_id, amount, currency, payment_method) {
        (Some(merchant_id), Some(customer_id), Some(amount), Some(currency), Some(payment_method))
            if errors.is_empty() =>
        {
            Ok(NewPayment {
                merchant_id,
                customer_id,
                amount,
                currency,
                payment_method,
                description,
                card_last_four: request.card_last_four.clone(),
                card_type: request.card_type.clone(),
            })
        }
        _ => Err(PaymentError::Validation(errors)),
    }
}

pub fn validate_refund(
    request: &RefundRequest,
    currency: Currency,
) -> Result<(Decimal, String), PaymentError> {
    let mut errors = Vec::new();

    let amount = check_amount(request.amount, Some(currency), &mut errors);

    let reason = match non_empty(request.reason.as_deref()) {
        Some(text) if text.len() > MAX_TEXT_LENGTH => {
            errors.push(format!("reason must not exceed {MAX_TEXT_LENGTH} characters"));
            None
        }
        Some(text) => Some(sanitize_text(text)),
        None => {
            errors.push("Refund reason is required".to_string());
            None
        }
    };

    match (amount, reason) {
        (Some(amount), Some(reason)) if errors.is_empty() => Ok((amount, reason)),
        _ => Err(PaymentError::Validation(errors)),
    }
}

// Strips URI-scheme and event-handler fragments, then escapes angle
// brackets, so stored text can be echoed into markup unchanged.
pub fn sanitize_text(value: &str) -> String {
    let mut cleaned = value.to_string();
    for fragment in ["javascript:", "onerror=", "onload="] {
        loop {
            let stripped = strip_fragment(&cleaned, fragment);
            if stripped == cleaned {
                break;
            }
            cleaned = stripped;
        }
    }
    cleaned.replace('<', "&lt;").replace('>', "&gt;")
}

fn strip_fragment(value: &str, fragment: &str) -> String {
    let bytes = value.as_bytes();
    let frag = fragment.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if frag.len() <= bytes.len() - i && bytes[i..i + frag.len()].eq_ignore_ascii_case(frag) {
            i += frag.len();
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    // the stripped fragments are pure ASCII, so the remainder is valid UTF-8
    String::from_utf8_lossy(&out).into_owned()
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn required_id(field: &str, value: Option<&str>, errors: &mut Vec<String>) -> Option<String> {
    match non_empty(value) {
        Some(v) if v.len() > MAX_ID_LENGTH => {
            errors.push(format!("{field} must not exceed {MAX_ID_LENGTH} characters"));
            None
        }
        Some(v) => Some(v.to_string()),
        None => {
            errors.push(format!("{field} is required"));
            None
        }
    }
}

fn check_amount(
    amount: Option<Decimal>,
    currency: Option<Currency>,
    errors: &mut Vec<String>,
) -> Option<Decimal> {
    match amount {
        Some(amount) => {
            if amount < MIN_AMOUNT {
                errors.push(format!("Amount must be at least {MIN_AMOUNT}"));
            } else if amount > MAX_AMOUNT {
                errors.push(format!("Amount cannot exceed {MAX_AMOUNT}"));
            } else if let Some(currency) = currency {
                if amount.normalize().scale() > currency.decimal_digits() {
                    errors.push(format!(
                        "Amount has too many decimal places for currency {}",
                        currency.as_str()
                    ));
                }
            }
            Some(amount)
        }
        None => {
            errors.push("Amount is required".to_string());
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_request() -> CreatePaymentRequest {
        CreatePaymentRequest {
            merchant_id: Some("merchant_001".to_string()),
            customer_id: Some("customer_001".to_string()),
            amount: Some(dec!(150.75)),
            currency: Some("USD".to_string()),
            payment_method: Some("credit_card".to_string()),
            description: None,
            card_last_four: Some("1234".to_string()),
            card_type: Some("visa".to_string()),
        }
    }

    fn messages(err: PaymentError) -> Vec<String> {
        err.messages()
    }

    #[test]
    fn empty_request_reports_every_missing_field() {
        let errors = messages(validate_create(&CreatePaymentRequest::default()).unwrap_err());
        let joined = errors.join("; ");
        assert!(joined.contains("merchant_id is required"));
        assert!(joined.contains("customer_id is required"));
        assert!(joined.contains("payment_method is required"));
        assert!(joined.contains("Amount is required"));
    }

    #[test]
    fn valid_request_passes_with_sanitized_description() {
        let mut request = base_request();
        request.description = Some("order <b>#42</b>".to_string());
        let payment = validate_create(&request).unwrap();
        assert_eq!(payment.amount, dec!(150.75));
        assert_eq!(payment.currency, Currency::Usd);
        assert_eq!(payment.description.as_deref(), Some("order &lt;b&gt;#42&lt;/b&gt;"));
    }

    #[test]
    fn amounts_below_minimum_are_rejected() {
        for bad in [dec!(0), dec!(-50.00), dec!(0.005)] {
            let mut request = base_request();
            request.amount = Some(bad);
            let errors = messages(validate_create(&request).unwrap_err());
            assert!(errors[0].contains("Amount must be at least"), "{errors:?}");
        }
    }

    #[test]
    fn amounts_above_maximum_are_rejected() {
        let mut request = base_request();
        request.amount = Some(dec!(999999999.99));
        let errors = messages(validate_create(&request).unwrap_err());
        assert!(errors[0].contains("Amount cannot exceed"));
    }

    #[test]
    fn unknown_currency_is_named_in_the_error() {
        let mut request = base_request();
        request.currency = Some("INVALID".to_string());
        let errors = messages(validate_create(&request).unwrap_err());
        assert!(errors[0].contains("Currency INVALID not supported"));
    }

    #[test]
    fn missing_currency_defaults_to_usd() {
        let mut request = base_request();
        request.currency = None;
        let payment = validate_create(&request).unwrap();
        assert_eq!(payment.currency, Currency::Usd);
    }

    #[test]
    fn jpy_rejects_fractional_amounts() {
        let mut request = base_request();
        request.currency = Some("JPY".to_string());
        request.amount = Some(dec!(1000.50));
        let errors = messages(validate_create(&request).unwrap_err());
        assert!(errors[0].contains("too many decimal places for currency JPY"));

        request.amount = Some(dec!(25000));
        assert!(validate_create(&request).is_ok());
    }

    #[test]
    fn unknown_payment_method_is_rejected() {
        let mut request = base_request();
        request.payment_method = Some("bitcoin".to_string());
        let errors = messages(validate_create(&request).unwrap_err());
        assert!(errors[0].contains("Invalid payment method"));
    }

    #[test]
    fn card_fields_require_a_card_method() {
        let mut request = base_request();
        request.payment_method = Some("bank_transfer".to_string());
        let errors = messages(validate_create(&request).unwrap_err());
        assert!(errors[0].contains("Card details are not allowed"));
    }

    #[test]
    fn card_last_four_must_be_four_digits() {
        for bad in ["12a4", "123", "12345"] {
            let mut request = base_request();
            request.card_last_four = Some(bad.to_string());
            let errors = messages(validate_create(&request).unwrap_err());
            assert!(errors[0].contains("card_last_four"), "{errors:?}");
        }
    }

    #[test]
    fn oversized_identifiers_are_rejected() {
        let mut request = base_request();
        request.merchant_id = Some("A".repeat(10_000));
        let errors = messages(validate_create(&request).unwrap_err());
        assert!(errors[0].contains("merchant_id must not exceed 255 characters"));
    }

    #[test]
    fn sanitize_strips_script_payloads() {
        let cleaned = sanitize_text("<script>alert('xss')</script>");
        assert!(!cleaned.contains("<script>"));
        assert!(cleaned.contains("alert"));

        let cleaned = sanitize_text("JaVaScRiPt:alert(1)");
        assert!(!cleaned.to_lowercase().contains("javascript:"));

        let cleaned = sanitize_text("<img src=x onerror=alert(1)>");
        assert!(!cleaned.contains("onerror="));
        assert!(!cleaned.contains('<'));

        assert_eq!(sanitize_text("plain refund note"), "plain refund note");
    }

    #[test]
    fn refund_requires_amount_and_reason() {
        let errors = messages(
            validate_refund(&RefundRequest::default(), Currency::Usd).unwrap_err(),
        );
        let joined = errors.join("; ");
        assert!(joined.contains("Amount is required"));
        assert!(joined.contains("Refund reason is required"));
    }

    #[test]
    fn refund_amounts_follow_payment_amount_rules() {
        let request = RefundRequest {
            amount: Some(dec!(-10.00)),
            reason: Some("duplicate".to_string()),
        };
        let errors = messages(validate_refund(&request, Currency::Usd).unwrap_err());
        assert!(errors[0].contains("Amount must be at least"));
    }

    #[test]
    fn refund_reason_is_sanitized() {
        let request = RefundRequest {
            amount: Some(dec!(10.00)),
            reason: Some("chargeback <script>x</script>".to_string()),
        };
        let (amount, reason) = validate_refund(&request, Currency::Usd).unwrap();
        assert_eq!(amount, dec!(10.00));
        assert!(!reason.contains("<script>"));
    }
}
