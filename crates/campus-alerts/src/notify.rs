use async_trait::async_trait;
use tracing::info;

use crate::errors::NotifyError;

const ALERT_SUBJECT: &str = "Price Alert";

/// Delivery channel for alert messages.
#[async_trait]
pub trait AlertPublisher: Send + Sync {
    async fn publish(&self, message: &str) -> Result<(), NotifyError>;
}

/// SNS topic publisher.
pub struct SnsPublisher {
    client: aws_sdk_sns::Client,
    topic_arn: String,
}

impl SnsPublisher {
    pub fn new(client: aws_sdk_sns::Client, topic_arn: impl Into<String>) -> Self {
        Self {
            client,
            topic_arn: topic_arn.into(),
        }
    }
}

#[async_trait]
impl AlertPublisher for SnsPublisher {
    async fn publish(&self, message: &str) -> Result<(), NotifyError> {
        self.client
            .publish()
            .topic_arn(&self.topic_arn)
            .subject(ALERT_SUBJECT)
            .message(message)
            .send()
            .await
            .map_err(aws_sdk_sns::Error::from)?;

        info!(topic = %self.topic_arn, "alert published");
        Ok(())
    }
}
