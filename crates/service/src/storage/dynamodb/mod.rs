//! DynamoDB storage backend.
//!
//! Implements [`ItemStore`] with `aws-sdk-dynamodb`. The table is expected to be
//! provisioned already with a numeric hash key named `Id`.

mod conversions;

use async_trait::async_trait;
use aws_sdk_dynamodb::{
    config::Region,
    error::DisplayErrorContext,
    types::{AttributeAction, AttributeValueUpdate, ReturnValue},
    Client,
};
use configs::StoreConfig;
use models::{item::KEY_ATTRIBUTE, AttributeUpdate, Item};
use tracing::{debug, info};

use super::{ItemStore, PutCondition, StoreError};
use conversions::{item_from_sdk, item_to_sdk, key_value, to_sdk};

const KEY_ABSENT_CONDITION: &str = "attribute_not_exists(Id)";

/// Item store backed by a DynamoDB table.
#[derive(Clone)]
pub struct DynamoDbItemStore {
    client: Client,
    table_name: String,
}

impl DynamoDbItemStore {
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self { client, table_name: table_name.into() }
    }

    /// Build the client from the default AWS provider chain, applying the
    /// configured region and endpoint overrides.
    pub async fn from_config(cfg: &StoreConfig) -> Self {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
        if let Some(region) = &cfg.region {
            loader = loader.region(Region::new(region.clone()));
        }
        let shared = loader.load().await;

        let mut builder = aws_sdk_dynamodb::config::Builder::from(&shared);
        if let Some(url) = &cfg.endpoint_url {
            builder = builder.endpoint_url(url);
        }
        info!(
            table = %cfg.table_name,
            region = ?shared.region(),
            endpoint = ?cfg.endpoint_url,
            "dynamodb item store configured"
        );
        Self::new(Client::from_conf(builder.build()), &cfg.table_name)
    }

    pub fn client(&self) -> &Client {
        &self.client
    }
}

fn unavailable<E>(err: E) -> StoreError
where
    E: std::error::Error,
{
    StoreError::Unavailable(DisplayErrorContext(&err).to_string())
}

#[async_trait]
impl ItemStore for DynamoDbItemStore {
    fn table_name(&self) -> &str {
        &self.table_name
    }

    async fn put_item(&self, item: Item, condition: PutCondition) -> Result<(), StoreError> {
        let mut req = self
            .client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item_to_sdk(item)));
        if condition == PutCondition::KeyAbsent {
            req = req.condition_expression(KEY_ABSENT_CONDITION);
        }
        match req.send().await {
            Ok(_) => Ok(()),
            Err(e) if e.as_service_error().is_some_and(|se| se.is_conditional_check_failed_exception()) => {
                Err(StoreError::ConditionalCheckFailed)
            }
            Err(e) => Err(unavailable(e)),
        }
    }

    async fn get_item(&self, id: i64) -> Result<Option<Item>, StoreError> {
        let out = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key(KEY_ATTRIBUTE, key_value(id))
            .send()
            .await
            .map_err(unavailable)?;
        debug!(id, found = out.item().is_some(), "dynamodb get_item");
        out.item().map(item_from_sdk).transpose()
    }

    async fn update_item(&self, id: i64, updates: Vec<AttributeUpdate>) -> Result<Item, StoreError> {
        let mut req = self
            .client
            .update_item()
            .table_name(&self.table_name)
            .key(KEY_ATTRIBUTE, key_value(id))
            .return_values(ReturnValue::AllNew);
        for update in updates {
            let action = AttributeValueUpdate::builder()
                .value(to_sdk(update.value))
                .action(AttributeAction::Put)
                .build();
            req = req.attribute_updates(update.name, action);
        }
        let out = req.send().await.map_err(unavailable)?;
        let attributes = out
            .attributes()
            .ok_or_else(|| StoreError::Malformed("update returned no attributes".into()))?;
        item_from_sdk(attributes)
    }

    async fn delete_item(&self, id: i64) -> Result<(), StoreError> {
        self.client
            .delete_item()
            .table_name(&self.table_name)
            .key(KEY_ATTRIBUTE, key_value(id))
            .send()
            .await
            .map_err(unavailable)?;
        Ok(())
    }
}
