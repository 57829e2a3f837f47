use actix_web::{get, web, HttpResponse, Responder};
use chrono::{DateTime, Utc};
use humantime::format_duration;
use once_cell::sync::Lazy;
use redis::RedisResult;
use serde::Serialize;
use std::{
    sync::{atomic::{AtomicI64, Ordering}, RwLock},
    time::Duration,
};
use sysinfo::System;

use crate::{
    constants::START_TIME, repositories::user::UserRepository, use_cases::extractors::AdminClaims,
    AppState,
};

const CACHE_SECONDS: i64 = 5;
const MB: f64 = 1024.0 * 1024.0;

#[derive(Serialize, Clone, Default)]
struct ServiceStatus {
    database: String,
    redis: String,
    media_storage: String,
}

#[derive(Serialize, Clone, Default)]
struct HealthReport {
    status: String,
    site: String,
    version: String,
    uptime: String,
    started_at: String,
    checked_at: String,
    host: String,
    memory_usage: String,
    services: ServiceStatus,
}

static LAST_CHECK: AtomicI64 = AtomicI64::new(0);
static CACHED_REPORT: Lazy<RwLock<HealthReport>> = Lazy::new(|| RwLock::new(HealthReport::default()));

/// `healthy` needs the database and a usable media bucket; Redis is optional.
fn overall_status(services: &ServiceStatus) -> &'static str {
    if services.database == "OK" && services.media_storage != "Unavailable" {
        "healthy"
    } else {
        "degraded"
    }
}

fn uptime_since(start: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = now.signed_duration_since(start).num_seconds().max(0) as u64;
    format_duration(Duration::from_secs(seconds)).to_string()
}

async fn redis_status(state: &AppState) -> &'static str {
    let Some(redis) = &state.redis_client else {
        return "Not configured";
    };
    match redis.get_multiplexed_async_connection().await {
        Ok(mut conn) => {
            let pong: RedisResult<String> = redis::cmd("PING").query_async(&mut conn).await;
            if matches!(pong.as_deref(), Ok("PONG")) { "OK" } else { "Unavailable" }
        }
        Err(e) => {
            tracing::warn!("Redis health check failed: {}", e);
            "Unavailable"
        }
    }
}

async fn build_report(state: &AppState) -> HealthReport {
    let now = Utc::now();

    let database = match state.auth_handler.user_repo.check_connection().await {
        Ok(()) => "OK",
        Err(e) => {
            tracing::warn!("Database health check failed: {}", e);
            "Unavailable"
        }
    };
    let services = ServiceStatus {
        database: database.to_string(),
        redis: redis_status(state).await.to_string(),
        media_storage: state.media_handler.storage.status().await.to_string(),
    };

    let mut sys = System::new();
    sys.refresh_processes(sysinfo::ProcessesToUpdate::All, true);
    let memory_usage = sysinfo::get_current_pid()
        .ok()
        .and_then(|pid| sys.process(pid))
        .map_or_else(|| "Unknown".to_string(), |p| format!("{:.2} MB", p.memory() as f64 / MB));

    HealthReport {
        status: overall_status(&services).to_string(),
        site: state.site_name.clone(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime: uptime_since(*START_TIME, now),
        started_at: START_TIME.to_rfc3339(),
        checked_at: now.to_rfc3339(),
        host: System::host_name().unwrap_or_else(|| "Unknown".to_string()),
        memory_usage,
        services,
    }
}

/// Admin health report, rebuilt at most every few seconds.
#[get("/health")]
pub async fn admin_health_check(_claims: AdminClaims, state: web::Data<AppState>) -> impl Responder {
    let now = Utc::now().timestamp();

    if now - LAST_CHECK.load(Ordering::Relaxed) <= CACHE_SECONDS {
        match CACHED_REPORT.read() {
            Ok(report) => return HttpResponse::Ok().json(report.clone()),
            Err(e) => tracing::warn!("Health report cache lock poisoned: {}", e),
        }
    }

    let report = build_report(&state).await;
    if let Ok(mut cache) = CACHED_REPORT.write() {
        *cache = report.clone();
        LAST_CHECK.store(now, Ordering::Relaxed);
    }
    HttpResponse::Ok().json(report)
}
