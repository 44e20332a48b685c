//! 支付网关
//!
//! 订阅创建时向 Stripe 申请支付意图；Webhook 请求用 `Stripe-Signature`
//! 头（`t=<ts>,v1=<hex>`）对 `"{t}.{body}"` 做 HMAC-SHA256 校验。

use async_trait::async_trait;
use hmac::{Hmac, Mac};
use serde_json::Value;
use sha2::Sha256;
use tracing::{debug, error};

use crate::config::{AppConfig, PaymentConfig};
use crate::errors::{EduManageError, Result};
use crate::models::subscriptions::entities::{
    INVOICE_STATUS_FAILED, INVOICE_STATUS_PAID, SUBSCRIPTION_STATUS_ACTIVE,
    SUBSCRIPTION_STATUS_CANCELLED, SUBSCRIPTION_STATUS_PAST_DUE,
};
use crate::models::subscriptions::responses::PaymentIntent;

type HmacSha256 = Hmac<Sha256>;

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn create_payment_intent(
        &self,
        amount: f64,
        description: &str,
        admin_id: i64,
    ) -> Result<PaymentIntent>;
}

/// 金额转为最小货币单位（分）
pub fn to_minor_units(amount: f64) -> i64 {
    (amount * 100.0).round() as i64
}

pub struct StripeGateway {
    client: reqwest::Client,
    api_base: String,
    secret_key: String,
    currency: String,
}

impl StripeGateway {
    pub fn new(config: &PaymentConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
            secret_key: config.stripe_secret_key.clone(),
            currency: config.currency.clone(),
        }
    }

    /// 未配置密钥时不启用网关
    pub fn from_config() -> Option<Self> {
        let config = &AppConfig::get().payment;
        if config.stripe_secret_key.trim().is_empty() {
            None
        } else {
            Some(Self::new(config))
        }
    }
}

#[async_trait]
impl PaymentGateway for StripeGateway {
    async fn create_payment_intent(
        &self,
        amount: f64,
        description: &str,
        admin_id: i64,
    ) -> Result<PaymentIntent> {
        let url = format!("{}/v1/payment_intents", self.api_base);
        let admin = admin_id.to_string();
        let minor = to_minor_units(amount).to_string();
        let form = [
            ("amount", minor.as_str()),
            ("currency", self.currency.as_str()),
            ("description", description),
            ("metadata[admin_id]", admin.as_str()),
        ];

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.secret_key)
            .form(&form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Payment gateway returned {}: {}", status, body);
            return Err(EduManageError::payment_gateway(format!(
                "Payment gateway returned {status}"
            )));
        }

        let intent: PaymentIntent = response.json().await?;
        debug!("Payment intent {} created", intent.id);
        Ok(intent)
    }
}

/// 解析后的签名头
#[derive(Debug, PartialEq)]
pub struct SignatureHeader {
    pub timestamp: i64,
    pub signatures: Vec<String>,
}

pub fn parse_signature_header(header: &str) -> Option<SignatureHeader> {
    let mut timestamp = None;
    let mut signatures = Vec::new();
    for part in header.split(',') {
        let Some((key, value)) = part.trim().split_once('=') else {
            continue;
        };
        match key {
            "t" => timestamp = value.parse::<i64>().ok(),
            "v1" => signatures.push(value.to_string()),
            _ => {}
        }
    }
    match timestamp {
        Some(timestamp) if !signatures.is_empty() => Some(SignatureHeader {
            timestamp,
            signatures,
        }),
        _ => None,
    }
}

pub fn compute_signature(secret: &str, timestamp: i64, payload: &[u8]) -> Result<String> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| EduManageError::signature_verification(format!("Invalid secret: {e}")))?;
    mac.update(timestamp.to_string().as_bytes());
    mac.update(b".");
    mac.update(payload);
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// 校验签名；tolerance 为 0 时不检查时间戳
pub fn verify_signature(
    secret: &str,
    header: &str,
    payload: &[u8],
    now: i64,
    tolerance: i64,
) -> Result<()> {
    let parsed = parse_signature_header(header)
        .ok_or_else(|| EduManageError::signature_verification("Malformed signature header"))?;

    if tolerance > 0 && now.abs_diff(parsed.timestamp) > tolerance.unsigned_abs() {
        return Err(EduManageError::signature_verification(
            "Signature timestamp outside tolerance",
        ));
    }

    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| EduManageError::signature_verification(format!("Invalid secret: {e}")))?;
    mac.update(parsed.timestamp.to_string().as_bytes());
    mac.update(b".");
    mac.update(payload);

    // 常量时间比较
    let matched = parsed.signatures.iter().any(|sig| {
        hex::decode(sig)
            .map(|bytes| mac.clone().verify_slice(&bytes).is_ok())
            .unwrap_or(false)
    });
    if matched {
        Ok(())
    } else {
        Err(EduManageError::signature_verification(
            "No matching signature found",
        ))
    }
}

/// Webhook 事件对应的状态变更
#[derive(Debug, Clone, PartialEq)]
pub enum WebhookUpdate {
    Invoice {
        stripe_invoice_id: String,
        status: &'static str,
        mark_paid: bool,
    },
    Subscription {
        stripe_subscription_id: String,
        status: &'static str,
    },
}

fn string_field(object: &Value, key: &str) -> Option<String> {
    object.get(key).and_then(Value::as_str).map(str::to_string)
}

/// 未识别的事件类型返回空列表
pub fn plan_webhook_updates(event: &Value) -> Vec<WebhookUpdate> {
    let event_type = event.get("type").and_then(Value::as_str).unwrap_or_default();
    let object = event.pointer("/data/object").unwrap_or(&Value::Null);
    let mut updates = Vec::new();

    match event_type {
        "invoice.paid" | "invoice.payment_failed" => {
            let paid = event_type == "invoice.paid";
            if let Some(id) = string_field(object, "id") {
                updates.push(WebhookUpdate::Invoice {
                    stripe_invoice_id: id,
                    status: if paid {
                        INVOICE_STATUS_PAID
                    } else {
                        INVOICE_STATUS_FAILED
                    },
                    mark_paid: paid,
                });
            }
            if let Some(id) = string_field(object, "subscription") {
                updates.push(WebhookUpdate::Subscription {
                    stripe_subscription_id: id,
                    status: if paid {
                        SUBSCRIPTION_STATUS_ACTIVE
                    } else {
                        SUBSCRIPTION_STATUS_PAST_DUE
                    },
                });
            }
        }
        "customer.subscription.deleted" => {
            if let Some(id) = string_field(object, "id") {
                updates.push(WebhookUpdate::Subscription {
                    stripe_subscription_id: id,
                    status: SUBSCRIPTION_STATUS_CANCELLED,
                });
            }
        }
        _ => {}
    }

    updates
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const SECRET: &str = "whsec_test";

    #[test]
    fn test_to_minor_units() {
        assert_eq!(to_minor_units(199.0), 19900);
        assert_eq!(to_minor_units(12.345), 1235);
    }

    #[test]
    fn test_parse_signature_header() {
        let parsed = parse_signature_header("t=1700000000,v1=abc,v0=old,v1=def").unwrap();
        assert_eq!(parsed.timestamp, 1700000000);
        assert_eq!(parsed.signatures, vec!["abc", "def"]);
        assert!(parse_signature_header("v1=abc").is_none());
        assert!(parse_signature_header("t=1700000000").is_none());
        assert!(parse_signature_header("garbage").is_none());
    }

    #[test]
    fn test_verify_signature_roundtrip() {
        let body = br#"{"type":"invoice.paid"}"#;
        let sig = compute_signature(SECRET, 1700000000, body).unwrap();
        let header = format!("t=1700000000,v1={sig}");
        assert!(verify_signature(SECRET, &header, body, 1700000100, 300).is_ok());
    }

    #[test]
    fn test_verify_signature_rejects_tampering() {
        let body = br#"{"type":"invoice.paid"}"#;
        let sig = compute_signature(SECRET, 1700000000, body).unwrap();
        let header = format!("t=1700000000,v1={sig}");

        assert!(verify_signature(SECRET, &header, b"{}", 1700000000, 300).is_err());
        assert!(verify_signature("other", &header, body, 1700000000, 300).is_err());
        // 超出时间容忍
        assert!(verify_signature(SECRET, &header, body, 1700001000, 300).is_err());
        // 容忍为 0 时不检查时间
        assert!(verify_signature(SECRET, &header, body, 1800000000, 0).is_ok());
    }

    #[test]
    fn test_extreme_timestamps_are_rejected() {
        for header in [
            "t=-9223372036854775808,v1=00",
            "t=9223372036854775807,v1=00",
        ] {
            assert!(verify_signature(SECRET, header, b"{}", 1_700_000_000, 300).is_err());
        }
        assert!(
            verify_signature(SECRET, "t=0,v1=00", b"{}", i64::MIN, i64::MAX).is_err()
        );
    }

    #[test]
    fn test_plan_invoice_paid() {
        let event = json!({
            "type": "invoice.paid",
            "data": {"object": {"id": "in_1", "subscription": "sub_1"}}
        });
        assert_eq!(
            plan_webhook_updates(&event),
            vec![
                WebhookUpdate::Invoice {
                    stripe_invoice_id: "in_1".to_string(),
                    status: INVOICE_STATUS_PAID,
                    mark_paid: true,
                },
                WebhookUpdate::Subscription {
                    stripe_subscription_id: "sub_1".to_string(),
                    status: SUBSCRIPTION_STATUS_ACTIVE,
                },
            ]
        );
    }

    #[test]
    fn test_plan_payment_failed_and_deleted() {
        let failed = json!({
            "type": "invoice.payment_failed",
            "data": {"object": {"id": "in_2", "subscription": "sub_2"}}
        });
        let updates = plan_webhook_updates(&failed);
        assert!(updates.contains(&WebhookUpdate::Subscription {
            stripe_subscription_id: "sub_2".to_string(),
            status: SUBSCRIPTION_STATUS_PAST_DUE,
        }));

        let deleted = json!({
            "type": "customer.subscription.deleted",
            "data": {"object": {"id": "sub_3"}}
        });
        assert_eq!(
            plan_webhook_updates(&deleted),
            vec![WebhookUpdate::Subscription {
                stripe_subscription_id: "sub_3".to_string(),
                status: SUBSCRIPTION_STATUS_CANCELLED,
            }]
        );

        assert!(plan_webhook_updates(&json!({"type": "charge.refunded"})).is_empty());
    }
}
