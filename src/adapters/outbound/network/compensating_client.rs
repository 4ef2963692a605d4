use crate::course_catalog::domain::PlatformEndpoint;
use crate::course_catalog::policies::{FalseFailurePolicy, PlatformOperation, VerificationStrategy};
use crate::course_catalog::services::{select_inventory, InventorySelection};
use crate::ports::outbound::{success_marker, HttpMethod, PlatformTransport, RequestDescriptor};
use crate::shared::error::PlatformError;
use crate::shared::PlatformResult;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Default pause before reading a product back by SKU
pub const DEFAULT_VERIFICATION_DELAY: Duration = Duration::from_millis(1500);

/// How a compensated write settled.
#[derive(Debug, Clone, PartialEq)]
pub enum Settlement {
    /// The platform answered with success
    Confirmed(Value),
    /// The platform reported a failure and a read-back found the result
    Verified {
        content: Value,
        /// The error the platform answered with
        suspected: String,
        /// Something the read-back noticed, e.g. several matching records
        remark: Option<String>,
    },
    /// The platform reported a known false failure that needs no read-back
    Assumed { content: Value, suspected: String },
}

impl Settlement {
    pub fn content(&self) -> &Value {
        match self {
            Settlement::Confirmed(content)
            | Settlement::Verified { content, .. }
            | Settlement::Assumed { content, .. } => content,
        }
    }

    pub fn into_content(self) -> Value {
        match self {
            Settlement::Confirmed(content)
            | Settlement::Verified { content, .. }
            | Settlement::Assumed { content, .. } => content,
        }
    }

    pub fn was_compensated(&self) -> bool {
        !matches!(self, Settlement::Confirmed(_))
    }

    /// The error the platform reported for a compensated write
    pub fn suspected_error(&self) -> Option<&str> {
        match self {
            Settlement::Confirmed(_) => None,
            Settlement::Verified { suspected, .. } | Settlement::Assumed { suspected, .. } => {
                Some(suspected)
            }
        }
    }

    pub fn remark(&self) -> Option<&str> {
        match self {
            Settlement::Verified { remark, .. } => remark.as_deref(),
            _ => None,
        }
    }
}

/// What a read-back needs to know about the write it checks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VerificationContext {
    pub sku: Option<String>,
    pub product_bvin: Option<String>,
    pub sent_payload: Option<Value>,
}

impl VerificationContext {
    pub fn by_sku(sku: impl Into<String>) -> Self {
        Self {
            sku: Some(sku.into()),
            ..Self::default()
        }
    }

    pub fn by_product(product_bvin: impl Into<String>) -> Self {
        Self {
            product_bvin: Some(product_bvin.into()),
            ..Self::default()
        }
    }

    pub fn sent(payload: Value) -> Self {
        Self {
            sent_payload: Some(payload),
            ..Self::default()
        }
    }
}

/// Request layer that absorbs the platform's known false failures.
///
/// A write that fails with a signature listed in the [`FalseFailurePolicy`]
/// is settled by a read-only verification instead of being reported. The
/// write itself is never repeated. Everything else propagates unchanged.
pub struct CompensatingClient<T: PlatformTransport> {
    transport: T,
    endpoint: PlatformEndpoint,
    policy: FalseFailurePolicy,
    verification_delay: Duration,
}

impl<T: PlatformTransport> CompensatingClient<T> {
    pub fn new(transport: T, endpoint: PlatformEndpoint) -> Self {
        Self {
            transport,
            endpoint,
            policy: FalseFailurePolicy::standard(),
            verification_delay: DEFAULT_VERIFICATION_DELAY,
        }
    }

    pub fn with_policy(mut self, policy: FalseFailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_verification_delay(mut self, delay: Duration) -> Self {
        self.verification_delay = delay;
        self
    }

    /// Starts a descriptor for `endpoint` with the configured target and key
    pub fn descriptor(&self, method: HttpMethod, endpoint: &str) -> RequestDescriptor {
        RequestDescriptor::new(&self.endpoint, method, endpoint)
    }

    /// One exchange without compensation; returns the unwrapped content.
    pub async fn request(&self, request: &RequestDescriptor) -> PlatformResult<Value> {
        Ok(self.transport.send(request).await?.into_content())
    }

    /// One exchange for `operation`, settling known false failures by verification.
    ///
    /// # Errors
    /// Returns the original error when no rule applies, or a
    /// [`PlatformError::Verification`] composite when the read-back could not
    /// confirm the write.
    pub async fn request_compensated(
        &self,
        operation: PlatformOperation,
        request: &RequestDescriptor,
        context: &VerificationContext,
    ) -> PlatformResult<Settlement> {
        let error = match self.transport.send(request).await {
            Ok(envelope) => return Ok(Settlement::Confirmed(envelope.into_content())),
            Err(error) => error,
        };

        let Some(strategy) = self.policy.strategy_for(operation, &error) else {
            return Err(error);
        };

        warn!(%operation, ?strategy, error = %error, "suspected false failure, verifying");
        match self.verify(strategy, context, error.to_string()).await {
            Ok(settlement) => {
                info!(%operation, "write confirmed despite error response");
                Ok(settlement)
            }
            Err(verification) => {
                warn!(%operation, %verification, "verification could not confirm the write");
                Err(PlatformError::Verification {
                    original: Box::new(error),
                    verification,
                })
            }
        }
    }

    async fn verify(
        &self,
        strategy: VerificationStrategy,
        context: &VerificationContext,
        suspected: String,
    ) -> Result<Settlement, String> {
        match strategy {
            VerificationStrategy::LookupBySku => {
                let sku = context
                    .sku
                    .as_deref()
                    .ok_or_else(|| "no SKU available to verify against".to_string())?;
                if !self.verification_delay.is_zero() {
                    tokio::time::sleep(self.verification_delay).await;
                }
                match self.find_product_by_sku(sku).await {
                    Ok(Some(product)) => Ok(Settlement::Verified {
                        content: product,
                        suspected,
                        remark: None,
                    }),
                    Ok(None) => Err(format!("no product found with SKU {}", sku)),
                    Err(e) => Err(format!("SKU lookup for {} failed: {}", sku, e)),
                }
            }
            VerificationStrategy::ResolveInventoryByProduct => {
                let product_bvin = context
                    .product_bvin
                    .as_deref()
                    .ok_or_else(|| "no product id available to verify against".to_string())?;
                match self.resolve_inventory(product_bvin).await {
                    Ok(Some(selection)) => Ok(Settlement::Verified {
                        remark: selection.is_ambiguous().then(|| {
                            format!(
                                "{} inventory records found for product {}; using {}",
                                selection.candidates, product_bvin, selection.bvin
                            )
                        }),
                        content: json!({
                            "Bvin": selection.bvin,
                            "ProductBvin": product_bvin,
                        }),
                        suspected,
                    }),
                    Ok(None) => Err(format!(
                        "no inventory record found for product {}",
                        product_bvin
                    )),
                    Err(e) => Err(format!(
                        "inventory lookup for product {} failed: {}",
                        product_bvin, e
                    )),
                }
            }
            VerificationStrategy::AssumeSentPayload => Ok(Settlement::Assumed {
                content: context.sent_payload.clone().unwrap_or_else(success_marker),
                suspected,
            }),
            VerificationStrategy::AssumeSuccess => Ok(Settlement::Assumed {
                content: success_marker(),
                suspected,
            }),
        }
    }

    /// `GET /products/ANY?bysku=<sku>`; `None` when the reply carries no `Bvin`.
    pub async fn find_product_by_sku(&self, sku: &str) -> PlatformResult<Option<Value>> {
        let request = self
            .descriptor(HttpMethod::Get, "/products/ANY")
            .with_query("bysku", sku);
        let found = match self.request(&request).await {
            Ok(found) => found,
            Err(e) if e.is_not_found() => return Ok(None),
            Err(e) => return Err(e),
        };
        Ok(has_bvin(&found).then_some(found))
    }

    /// `GET /productinventory?byproduct=<bvin>`, raw listing
    pub async fn list_inventory_for_product(&self, product_bvin: &str) -> PlatformResult<Value> {
        let request = self
            .descriptor(HttpMethod::Get, "/productinventory")
            .with_query("byproduct", product_bvin);
        self.request(&request).await
    }

    /// First inventory record for a product, if any.
    pub async fn resolve_inventory(
        &self,
        product_bvin: &str,
    ) -> PlatformResult<Option<InventorySelection>> {
        let listing = self.list_inventory_for_product(product_bvin).await?;
        let selection = select_inventory(&listing);
        match &selection {
            Some(selection) if selection.is_ambiguous() => warn!(
                product = product_bvin,
                candidates = selection.candidates,
                chosen = %selection.bvin,
                "multiple inventory records for product, using the first"
            ),
            Some(selection) => debug!(product = product_bvin, inventory = %selection.bvin, "inventory resolved"),
            None => debug!(product = product_bvin, "no inventory record found"),
        }
        Ok(selection)
    }
}

fn has_bvin(value: &Value) -> bool {
    value
        .get("Bvin")
        .and_then(Value::as_str)
        .is_some_and(|bvin| !bvin.trim().is_empty())
}
