//! Scheduled job that emails customers with overdue loans

use std::sync::Arc;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::{
    config::SchedulerConfig,
    error::{AppError, AppResult},
    models::loan::Loan,
    services::{email::OverdueNotifier, Services},
};

/// Starts the overdue-loan notification scheduler
///
/// The job runs on the configured cron schedule, queries active loans whose
/// loan date is older than the configured threshold, and sends each customer
/// a notification email.
pub async fn start_scheduler(services: Arc<Services>, config: SchedulerConfig) -> AppResult<()> {
    let scheduler = JobScheduler::new()
        .await
        .map_err(|e| AppError::Internal(format!("Failed to create job scheduler: {}", e)))?;

    let cron = config.overdue_cron.clone();

    // Clone resources for the job
    let job_services = services.clone();
    let job_config = config.clone();

    let job = Job::new_async(cron.as_str(), move |_uuid, _lock| {
        let services = job_services.clone();
        let config = job_config.clone();

        Box::pin(async move {
            if let Err(e) = notify_overdue_loans(&services, &config).await {
                tracing::error!("Error processing overdue loan notifications: {}", e);
            }
        })
    })
    .map_err(|e| AppError::Internal(format!("Invalid cron expression '{}': {}", cron, e)))?;

    scheduler
        .add(job)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to add scheduled job: {}", e)))?;
    scheduler
        .start()
        .await
        .map_err(|e| AppError::Internal(format!("Failed to start scheduler: {}", e)))?;

    tracing::info!("Overdue loan scheduler started (cron: {})", cron);

    Ok(())
}

/// Queries overdue loans and emails each customer
pub async fn notify_overdue_loans(services: &Services, config: &SchedulerConfig) -> AppResult<()> {
    let loans = services
        .loans
        .overdue_loans(config.overdue_after_days)
        .await?;

    send_overdue_notices(&services.email, &config.overdue_message, loans).await;

    Ok(())
}

/// Sends the notice to every customer in the batch. Send failures are logged
/// per recipient and do not abort the batch.
pub async fn send_overdue_notices<N>(notifier: &N, message: &str, loans: Vec<Loan>)
where
    N: OverdueNotifier + ?Sized,
{
    if loans.is_empty() {
        tracing::debug!("No overdue loans to notify");
        return;
    }

    tracing::info!("Sending overdue notices for {} loans", loans.len());

    for loan in loans {
        if let Err(e) = notifier
            .send_overdue_notice(&loan.customer_email, message)
            .await
        {
            tracing::error!(
                "Failed to send overdue notice for loan {} to {}: {}",
                loan.id,
                loan.customer_email,
                e
            );
        }
    }
}
