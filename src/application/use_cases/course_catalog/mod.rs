use crate::adapters::outbound::network::{
    CompensatingClient, VerificationContext, DEFAULT_VERIFICATION_DELAY,
};
use crate::application::dto::{
    CourseCreation, CourseDeletion, CreateCourseRequest, InventoryResolution, OperationOutcome,
    UpdateCourseRequest,
};
use crate::application::read_models::{CourseListing, StockView};
use crate::course_catalog::domain::{
    Bvin, Category, CategoryProductAssociation, CourseProduct, CourseTemplate,
    InventoryQuantityUpdate, InventoryRecord, PlatformSettings,
};
use crate::course_catalog::policies::{FalseFailurePolicy, PlatformOperation};
use crate::course_catalog::services::{CourseDraft, SkuScheduler};
use crate::ports::outbound::{
    HttpMethod, InventoryMapStore, PlatformTransport, ProgressReporter, SettingsStore,
    TemplateStore,
};
use crate::shared::error::AdminError;
use crate::shared::Result;
use anyhow::Context;
use futures::stream::{self, StreamExt};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Default number of stock lookups in flight while listing courses
pub const DEFAULT_STOCK_CONCURRENCY: usize = 8;

const PRODUCTS: &str = "/products";
const INVENTORY: &str = "/productinventory";
const CATEGORIES: &str = "/categories";
const ASSOCIATIONS: &str = "/categoryproductassociations";
const COURSE_PAGE_SIZE: &str = "1000";

type Client<'a, T> = CompensatingClient<&'a T>;

/// CourseCatalogUseCase - multi-step course operations against the platform
///
/// Each operation is a strictly sequential chain of requests; later steps
/// need the ids produced by earlier ones. Every write goes through the
/// compensating client, so known false failures are settled per step.
///
/// Only the primary resource's own failure is fatal. Dependent steps
/// (inventory record, category link, mapping cache) that fail are
/// returned as warnings on an otherwise successful outcome.
///
/// Nothing coordinates concurrent operations: two updates to the same
/// record race at the platform, and the inventory map is last-write-wins.
///
/// # Type Parameters
/// * `T` - PlatformTransport implementation
/// * `S` - SettingsStore implementation
/// * `M` - InventoryMapStore implementation
/// * `TS` - TemplateStore implementation
/// * `PR` - ProgressReporter implementation
pub struct CourseCatalogUseCase<T, S, M, TS, PR> {
    transport: T,
    settings_store: S,
    inventory_map: M,
    template_store: TS,
    progress_reporter: PR,
    policy: FalseFailurePolicy,
    verification_delay: Duration,
    stock_concurrency: usize,
}

impl<T, S, M, TS, PR> CourseCatalogUseCase<T, S, M, TS, PR>
where
    T: PlatformTransport,
    S: SettingsStore,
    M: InventoryMapStore,
    TS: TemplateStore,
    PR: ProgressReporter,
{
    /// Creates a new CourseCatalogUseCase with injected dependencies
    pub fn new(
        transport: T,
        settings_store: S,
        inventory_map: M,
        template_store: TS,
        progress_reporter: PR,
    ) -> Self {
        Self {
            transport,
            settings_store,
            inventory_map,
            template_store,
            progress_reporter,
            policy: FalseFailurePolicy::standard(),
            verification_delay: DEFAULT_VERIFICATION_DELAY,
            stock_concurrency: DEFAULT_STOCK_CONCURRENCY,
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

    pub fn with_stock_concurrency(mut self, concurrency: usize) -> Self {
        self.stock_concurrency = concurrency.max(1);
        self
    }

    /// Reads the current settings and builds a client for them.
    ///
    /// Settings are read per operation so a change takes effect without a restart.
    fn connect(&self) -> Result<(Client<'_, T>, PlatformSettings)> {
        let settings = self.settings_store.read_settings()?;
        let endpoint = settings.endpoint()?;
        debug!(target = %endpoint.target(), api_root = %endpoint.api_root, "platform endpoint");

        let client = CompensatingClient::new(&self.transport, endpoint)
            .with_policy(self.policy.clone())
            .with_verification_delay(self.verification_delay);
        Ok((client, settings))
    }

    /// Courses in the default category.
    ///
    /// # Errors
    /// Fails when no default category is configured or the listing fails.
    pub async fn list_courses(&self) -> Result<Vec<CourseListing>> {
        let (client, settings) = self.connect()?;
        self.fetch_courses(&client, &settings).await
    }

    /// Courses in the default category, each with its current stock.
    ///
    /// A stock lookup that fails is recorded on its row and never fails the listing.
    pub async fn list_courses_with_stock(&self) -> Result<Vec<CourseListing>> {
        let (client, settings) = self.connect()?;
        let mut courses = self.fetch_courses(&client, &settings).await?;
        let total = courses.len();

        let client = &client;
        let stocks: Vec<StockView> = stream::iter(courses.iter().map(|course| course.bvin.clone()))
            .map(|bvin| async move { self.stock_view(client, &bvin).await })
            .buffered(self.stock_concurrency)
            .enumerate()
            .map(|(index, stock)| {
                self.progress_reporter
                    .report_progress(index + 1, total, Some("Reading stock"));
                stock
            })
            .collect()
            .await;

        for (course, stock) in courses.iter_mut().zip(stocks) {
            course.stock = Some(stock);
        }
        if total > 0 {
            self.progress_reporter
                .report_completion(&format!("✅ Stock read for {} course(s)", total));
        }
        Ok(courses)
    }

    async fn fetch_courses(
        &self,
        client: &Client<'_, T>,
        settings: &PlatformSettings,
    ) -> Result<Vec<CourseListing>> {
        let category = settings.require_category()?;
        let request = client
            .descriptor(HttpMethod::Get, PRODUCTS)
            .with_query("bycategory", category)
            .with_query("page", "1")
            .with_query("pagesize", COURSE_PAGE_SIZE);
        let reply = client
            .request(&request)
            .await
            .context("Failed to list courses")?;

        let products: &[Value] = match &reply {
            Value::Array(items) => items,
            other => other
                .get("Products")
                .and_then(Value::as_array)
                .map(Vec::as_slice)
                .unwrap_or(&[]),
        };
        let courses: Vec<CourseListing> = products
            .iter()
            .filter_map(CourseProduct::from_reply)
            .filter_map(|product| CourseListing::from_product(&product))
            .collect();

        info!(category, count = courses.len(), "courses listed");
        Ok(courses)
    }

    async fn stock_view(&self, client: &Client<'_, T>, product_bvin: &str) -> StockView {
        match self.fetch_inventory(client, product_bvin).await {
            Ok(outcome) => StockView::known(
                outcome.value.id().unwrap_or_default(),
                outcome.value.quantity_on_hand,
            )
            .with_warnings(outcome.warnings),
            Err(e) => {
                warn!(product = product_bvin, error = %e, "stock lookup failed");
                StockView::failed(format!("{:#}", e))
            }
        }
    }

    /// All catalog categories; anything but an array reads as empty.
    pub async fn list_categories(&self) -> Result<Vec<Category>> {
        let (client, _) = self.connect()?;
        let reply = client
            .request(&client.descriptor(HttpMethod::Get, CATEGORIES))
            .await
            .context("Failed to list categories")?;

        Ok(reply
            .as_array()
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| serde_json::from_value::<Category>(item.clone()).ok())
                    .filter(|category| !category.bvin.trim().is_empty())
                    .collect()
            })
            .unwrap_or_default())
    }

    /// The full product record as the platform returns it.
    ///
    /// # Errors
    /// [`AdminError::ProductNotFound`] on HTTP 404 or a reply without `Bvin`.
    pub async fn get_product(&self, bvin: &Bvin) -> Result<Value> {
        let (client, _) = self.connect()?;
        self.fetch_product(&client, bvin.as_str()).await
    }

    async fn fetch_product(&self, client: &Client<'_, T>, bvin: &str) -> Result<Value> {
        let request = client.descriptor(HttpMethod::Get, &product_path(bvin));
        let reply = match client.request(&request).await {
            Ok(reply) => reply,
            Err(e) if e.is_not_found() => {
                return Err(AdminError::ProductNotFound {
                    bvin: bvin.to_string(),
                }
                .into())
            }
            Err(e) => return Err(e).with_context(|| format!("Failed to fetch product {}", bvin)),
        };

        if CourseProduct::from_reply(&reply).is_none() {
            return Err(AdminError::ProductNotFound {
                bvin: bvin.to_string(),
            }
            .into());
        }
        Ok(reply)
    }

    /// Creates product, inventory record and category link for a new course.
    ///
    /// Steps run in order. The operation succeeds once the product exists;
    /// inventory and category failures only add warnings, and the created
    /// product is never rolled back.
    pub async fn create_course(
        &self,
        request: CreateCourseRequest,
    ) -> Result<OperationOutcome<CourseCreation>> {
        let template = self.find_template(&request.template_id)?;
        let (client, settings) = self.connect()?;
        let draft = CourseDraft::from_template(&template, &request.schedule, request.seats);
        let mut warnings = Vec::new();

        // Step 1: product (fatal)
        self.progress_reporter
            .report(&format!("📦 Creating product {}", draft.product.sku));
        let (product, verified_after_error) = self
            .create_product(&client, &draft.product)
            .await
            .with_context(|| format!("Course creation failed for SKU {}", draft.product.sku))?;
        let product_bvin = product
            .get("Bvin")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        info!(product = %product_bvin, sku = %draft.product.sku, verified_after_error, "product created");

        // Step 2: inventory record (advisory)
        self.progress_reporter
            .report(&format!("📋 Creating inventory for {} seat(s)", request.seats));
        let inventory_bvin = match self
            .create_inventory(&client, &product_bvin, draft.inventory)
            .await
        {
            Ok(outcome) => {
                warnings.extend(outcome.warnings);
                Some(outcome.value)
            }
            Err(e) => {
                advise(
                    &mut warnings,
                    format!("Inventory creation failed for product {}: {:#}", product_bvin, e),
                );
                None
            }
        };

        // Step 3: category link (advisory)
        let category_id = match settings.default_category() {
            None => {
                advise(
                    &mut warnings,
                    format!(
                        "No default category configured; product {} was not linked to a category",
                        product_bvin
                    ),
                );
                None
            }
            Some(category) => {
                self.progress_reporter
                    .report(&format!("🔗 Linking product to category {}", category));
                match self.link_category(&client, &product_bvin, category).await {
                    Ok(()) => Some(category.to_string()),
                    Err(e) => {
                        advise(
                            &mut warnings,
                            format!(
                                "Category link failed for product {} and category {}: {:#}",
                                product_bvin, category, e
                            ),
                        );
                        None
                    }
                }
            }
        };

        self.progress_reporter
            .report_completion(&format!("✅ Course created: {}", product_bvin));
        Ok(OperationOutcome::with_warnings(
            CourseCreation {
                product,
                inventory_bvin,
                category_id,
                verified_after_error,
            },
            warnings,
        ))
    }

    fn find_template(&self, template_id: &str) -> Result<CourseTemplate> {
        self.template_store
            .read_templates()?
            .into_iter()
            .find(|template| template.template_id == template_id)
            .ok_or_else(|| {
                AdminError::TemplateNotFound {
                    template_id: template_id.to_string(),
                }
                .into()
            })
    }

    async fn create_product(
        &self,
        client: &Client<'_, T>,
        product: &CourseProduct,
    ) -> Result<(Value, bool)> {
        let request = client
            .descriptor(HttpMethod::Post, PRODUCTS)
            .with_body(serde_json::to_value(product)?);
        let settlement = client
            .request_compensated(
                PlatformOperation::CreateProduct,
                &request,
                &VerificationContext::by_sku(&product.sku),
            )
            .await?;

        let compensated = settlement.was_compensated();
        let created = settlement.into_content();
        if CourseProduct::from_reply(&created).is_none() {
            anyhow::bail!("the platform accepted the product but returned no Bvin");
        }
        Ok((created, compensated))
    }

    async fn create_inventory(
        &self,
        client: &Client<'_, T>,
        product_bvin: &str,
        mut inventory: InventoryRecord,
    ) -> Result<OperationOutcome<String>> {
        inventory.product_bvin = Some(product_bvin.to_string());
        let request = client
            .descriptor(HttpMethod::Post, INVENTORY)
            .with_body(serde_json::to_value(&inventory)?);
        let settlement = client
            .request_compensated(
                PlatformOperation::CreateInventory,
                &request,
                &VerificationContext::by_product(product_bvin),
            )
            .await?;

        let created = settlement
            .content()
            .get("Bvin")
            .and_then(Value::as_str)
            .filter(|bvin| !bvin.trim().is_empty())
            .map(str::to_string);
        let Some(inventory_bvin) = created else {
            debug!(product = product_bvin, "inventory created without an id in the reply, resolving");
            let resolution = self.resolve_and_remember(client, product_bvin).await?;
            return Ok(resolution.map(|resolved| resolved.inventory_bvin));
        };

        // A record found after an error may predate this course
        let mut warnings = Vec::new();
        if let Some(suspected) = settlement.suspected_error() {
            advise(
                &mut warnings,
                format!(
                    "Inventory creation for product {} failed ({}); using inventory record {} found by product lookup",
                    product_bvin, suspected, inventory_bvin
                ),
            );
        }
        if let Some(remark) = settlement.remark() {
            advise(&mut warnings, remark.to_string());
        }
        self.remember_inventory(product_bvin, &inventory_bvin, &mut warnings);
        Ok(OperationOutcome::with_warnings(inventory_bvin, warnings))
    }

    async fn link_category(
        &self,
        client: &Client<'_, T>,
        product_bvin: &str,
        category_id: &str,
    ) -> Result<()> {
        let association = CategoryProductAssociation {
            product_id: product_bvin.to_string(),
            category_id: category_id.to_string(),
        };
        let request = client
            .descriptor(HttpMethod::Post, ASSOCIATIONS)
            .with_body(serde_json::to_value(&association)?);
        client
            .request_compensated(
                PlatformOperation::CreateAssociation,
                &request,
                &VerificationContext::default(),
            )
            .await?;
        Ok(())
    }

    /// Moves a course to a new start and price.
    ///
    /// The whole fetched record is sent back with SKU, name and price
    /// replaced. When the platform reports the known false failure, the
    /// payload that was sent is returned as the new state.
    pub async fn update_course(&self, request: UpdateCourseRequest) -> Result<Value> {
        let (client, _) = self.connect()?;
        let bvin = request.product_bvin.as_str();
        let current = self.fetch_product(&client, bvin).await?;

        let mut product: CourseProduct = serde_json::from_value(current)?;
        product.site_price = Some(request.price);
        product.sku = SkuScheduler::reschedule_sku(&product.sku, &request.schedule);
        product.product_name =
            SkuScheduler::reschedule_name(&product.product_name, &request.schedule);
        product.strip_server_managed_fields();
        info!(product = bvin, sku = %product.sku, price = request.price, "updating course");

        let payload = serde_json::to_value(&product)?;
        let http_request = client
            .descriptor(HttpMethod::Post, &product_path(bvin))
            .with_body(payload.clone());
        let settlement = client
            .request_compensated(
                PlatformOperation::UpdateProduct,
                &http_request,
                &VerificationContext::sent(payload),
            )
            .await
            .with_context(|| format!("Failed to update product {}", bvin))?;

        Ok(settlement.into_content())
    }

    /// Deletes a course and drops its cached inventory link.
    ///
    /// Any HTTP 500 from the delete counts as success.
    pub async fn delete_course(&self, bvin: &Bvin) -> Result<OperationOutcome<CourseDeletion>> {
        let (client, _) = self.connect()?;
        let request = client.descriptor(HttpMethod::Delete, &product_path(bvin.as_str()));
        let settlement = client
            .request_compensated(
                PlatformOperation::DeleteProduct,
                &request,
                &VerificationContext::default(),
            )
            .await
            .with_context(|| format!("Failed to delete product {}", bvin))?;

        let mut warnings = Vec::new();
        let mapping_removed = match self.inventory_map.forget(bvin.as_str()) {
            Ok(removed) => removed,
            Err(e) => {
                advise(
                    &mut warnings,
                    format!("Inventory mapping for {} could not be removed: {:#}", bvin, e),
                );
                false
            }
        };
        info!(product = %bvin, assumed = settlement.was_compensated(), mapping_removed, "course deleted");

        Ok(OperationOutcome::with_warnings(
            CourseDeletion {
                bvin: bvin.to_string(),
                assumed: settlement.was_compensated(),
                mapping_removed,
            },
            warnings,
        ))
    }

    /// Finds the inventory record of a product and caches the link.
    ///
    /// Picks the first record when the platform lists several, with a warning.
    /// Nothing is cached when there is none.
    pub async fn resolve_inventory(
        &self,
        product_bvin: &Bvin,
    ) -> Result<OperationOutcome<InventoryResolution>> {
        let (client, _) = self.connect()?;
        self.resolve_and_remember(&client, product_bvin.as_str())
            .await
    }

    async fn resolve_and_remember(
        &self,
        client: &Client<'_, T>,
        product_bvin: &str,
    ) -> Result<OperationOutcome<InventoryResolution>> {
        let selection = client
            .resolve_inventory(product_bvin)
            .await
            .with_context(|| format!("Failed to look up inventory for product {}", product_bvin))?
            .ok_or_else(|| AdminError::InventoryNotFound {
                product_bvin: product_bvin.to_string(),
            })?;

        let mut warnings = Vec::new();
        if selection.is_ambiguous() {
            advise(
                &mut warnings,
                format!(
                    "{} inventory records found for product {}; using {}",
                    selection.candidates, product_bvin, selection.bvin
                ),
            );
        }
        self.remember_inventory(product_bvin, &selection.bvin, &mut warnings);

        Ok(OperationOutcome::with_warnings(
            InventoryResolution {
                product_bvin: product_bvin.to_string(),
                inventory_bvin: selection.bvin,
                candidates: selection.candidates,
            },
            warnings,
        ))
    }

    fn remember_inventory(&self, product_bvin: &str, inventory_bvin: &str, warnings: &mut Vec<String>) {
        if let Err(e) = self.inventory_map.remember(product_bvin, inventory_bvin) {
            advise(
                warnings,
                format!(
                    "Inventory mapping {} -> {} could not be saved: {:#}",
                    product_bvin, inventory_bvin, e
                ),
            );
        }
    }

    /// The inventory record of a product, via the cached link when possible.
    ///
    /// A cached id the platform no longer knows is dropped and resolved again once.
    pub async fn get_inventory(
        &self,
        product_bvin: &Bvin,
    ) -> Result<OperationOutcome<InventoryRecord>> {
        let (client, _) = self.connect()?;
        self.fetch_inventory(&client, product_bvin.as_str()).await
    }

    async fn fetch_inventory(
        &self,
        client: &Client<'_, T>,
        product_bvin: &str,
    ) -> Result<OperationOutcome<InventoryRecord>> {
        if let Some(cached) = self.inventory_map.lookup(product_bvin)? {
            match self.fetch_inventory_record(client, &cached).await? {
                Some(record) => return Ok(OperationOutcome::new(record)),
                None => {
                    warn!(product = product_bvin, inventory = %cached, "cached inventory id is stale, resolving again");
                    self.inventory_map.forget(product_bvin)?;
                }
            }
        }

        let resolution = self.resolve_and_remember(client, product_bvin).await?;
        let inventory_bvin = resolution.value.inventory_bvin.clone();
        let record = self
            .fetch_inventory_record(client, &inventory_bvin)
            .await?
            .ok_or_else(|| AdminError::InventoryIncomplete {
                bvin: inventory_bvin.clone(),
            })?;
        Ok(resolution.map(|_| record))
    }

    /// `None` for HTTP 404 or a reply without `Bvin`
    async fn fetch_inventory_record(
        &self,
        client: &Client<'_, T>,
        inventory_bvin: &str,
    ) -> Result<Option<InventoryRecord>> {
        let request = client.descriptor(HttpMethod::Get, &inventory_path(inventory_bvin));
        match client.request(&request).await {
            Ok(reply) => Ok(InventoryRecord::from_reply(&reply)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => {
                Err(e).with_context(|| format!("Failed to fetch inventory {}", inventory_bvin))
            }
        }
    }

    /// Sets the quantity on hand of an inventory record.
    ///
    /// Only the id, the product link and the quantity are sent. When the
    /// platform reports the known false failure, that payload is returned
    /// as the assumed new state.
    pub async fn update_inventory(&self, inventory_bvin: &Bvin, quantity: u32) -> Result<Value> {
        let (client, _) = self.connect()?;
        let incomplete = || AdminError::InventoryIncomplete {
            bvin: inventory_bvin.to_string(),
        };

        let record = self
            .fetch_inventory_record(&client, inventory_bvin.as_str())
            .await?
            .ok_or_else(incomplete)?;
        let product_bvin = record.product_id().ok_or_else(incomplete)?;

        let update = InventoryQuantityUpdate {
            bvin: record.id().unwrap_or(inventory_bvin.as_str()).to_string(),
            product_bvin: product_bvin.to_string(),
            quantity_on_hand: quantity,
        };
        let payload = serde_json::to_value(&update)?;
        let request = client
            .descriptor(HttpMethod::Post, &inventory_path(inventory_bvin.as_str()))
            .with_body(payload.clone());
        let settlement = client
            .request_compensated(
                PlatformOperation::UpdateInventory,
                &request,
                &VerificationContext::sent(payload),
            )
            .await
            .with_context(|| format!("Failed to update inventory {}", inventory_bvin))?;

        info!(inventory = %inventory_bvin, quantity, assumed = settlement.was_compensated(), "inventory updated");
        Ok(settlement.into_content())
    }
}

fn advise(warnings: &mut Vec<String>, message: String) {
    warn!("{}", message);
    warnings.push(message);
}

fn product_path(bvin: &str) -> String {
    format!("{}/{}", PRODUCTS, urlencoding::encode(bvin))
}

fn inventory_path(bvin: &str) -> String {
    format!("{}/{}", INVENTORY, urlencoding::encode(bvin))
}
