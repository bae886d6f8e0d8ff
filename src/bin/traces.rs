//! traces CLI: operator interface to the order trace store and its
//! efficiency analytics.

use clap::{Parser, Subcommand};
use order_traces::TraceEngine;
use order_traces::config::Config;
use order_traces::config::secrets::ExposeSecret;
use order_traces::db::Db;
use order_traces::model::{NewOrderTrace, OrderStatus};
use order_traces::telemetry::{TelemetryConfig, init_telemetry};
use serde::Serialize;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "traces", about = "Order traces and fulfillment efficiency")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Apply pending database migrations
    Migrate,
    /// Record an order status transition
    Record {
        order_id: i64,
        /// New status (PENDING, IN_PREPARATION, READY, DELIVERED)
        new_status: String,
        #[arg(long)]
        client_id: i64,
        #[arg(long)]
        client_email: String,
        #[arg(long)]
        previous_status: Option<String>,
        /// Responsible employee, omitted for client-initiated transitions
        #[arg(long)]
        employee_id: Option<i64>,
        #[arg(long, requires = "employee_id")]
        employee_email: Option<String>,
    },
    /// Show the trace history of an order
    History { order_id: i64 },
    /// Efficiency analytics
    Efficiency {
        #[command(subcommand)]
        query: EfficiencyQuery,
    },
}

#[derive(Subcommand)]
enum EfficiencyQuery {
    /// Duration of every delivery, by order id
    Orders,
    /// Duration of one order
    Order { order_id: i64 },
    /// Employees ranked by average duration
    Ranking,
    /// Efficiency of one employee
    Employee { employee_id: i64 },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = Config::from_env()?;

    let _guard = init_telemetry(TelemetryConfig {
        endpoint: config.otel_endpoint.clone(),
        service_name: "order-traces".to_string(),
        log_level: config.log_level.clone(),
    })?;

    let db = Db::connect(config.database_url.expose_secret(), config.db_max_connections).await?;
    db.migrate().await?;

    let engine = TraceEngine::new(Arc::new(db));

    match cli.command {
        Command::Migrate => {
            engine.store().health_check().await?;
            println!("Migrations applied.");
            Ok(())
        }
        Command::Record {
            order_id,
            new_status,
            client_id,
            client_email,
            previous_status,
            employee_id,
            employee_email,
        } => {
            let mut trace =
                NewOrderTrace::new(order_id, client_id, client_email, parse_status(&new_status)?);
            if let Some(ref previous) = previous_status {
                trace = trace.previous_status(parse_status(previous)?);
            }
            trace.employee_id = employee_id;
            trace.employee_email = employee_email;

            print_json(&engine.create_trace(&trace).await?)
        }
        Command::History { order_id } => print_json(&engine.order_history(order_id).await?),
        Command::Efficiency { query } => match query {
            EfficiencyQuery::Orders => print_json(&engine.all_orders_efficiency().await?),
            EfficiencyQuery::Order { order_id } => {
                print_json(&engine.order_efficiency(order_id).await?)
            }
            EfficiencyQuery::Ranking => {
                print_json(&engine.employees_efficiency_ranking().await?)
            }
            EfficiencyQuery::Employee { employee_id } => {
                print_json(&engine.employee_efficiency(employee_id).await?)
            }
        },
    }
}

fn parse_status(raw: &str) -> anyhow::Result<OrderStatus> {
    raw.to_ascii_uppercase()
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid status: {raw}"))
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
