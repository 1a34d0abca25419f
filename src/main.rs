//! 사용자 온보딩 서비스 메인 애플리케이션
//!
//! Actix-web 기반의 HTTP 서버를 구동하고 PostgreSQL, Kafka 연결을 초기화합니다.
//! 컨슈머가 활성화되어 있으면 같은 프로세스에서 이벤트 구독 루프도 실행합니다.

use std::io;
use std::sync::Arc;

use actix_cors::Cors;
use actix_governor::{Governor, GovernorConfigBuilder};
use actix_web::http::header;
use actix_web::{App, HttpServer, middleware, web};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info, warn};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use user_onboarding_service::config::{DatabaseConfig, Environment, KafkaConfig, ServerConfig};
use user_onboarding_service::db::Database;
use user_onboarding_service::messaging::{
    ConsumerStats, EventPublisher, KafkaPublisher, KafkaSubscriber, UserEventLogger,
};
use user_onboarding_service::repositories::users::PgUserRepository;
use user_onboarding_service::routes::configure_all_routes;
use user_onboarding_service::services::users::UserService;

/// Rate Limiting 설정 구조체
#[derive(Debug)]
struct RateLimitConfig {
    per_second: u64,
    burst_size: u32,
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    // 환경 설정 및 로깅 초기화
    load_env_file();
    init_logging();

    info!("🚀 사용자 온보딩 서비스 시작중... ({:?})", Environment::current());

    let database = initialize_database().await?;

    let store = Arc::new(PgUserRepository::new(database.pool().clone(), DatabaseConfig::query_timeout()));
    let publisher = Arc::new(
        KafkaPublisher::new(&KafkaConfig::brokers(), &KafkaConfig::topic(), KafkaConfig::publish_timeout())
            .map_err(|e| startup_error("Kafka 발행자 초기화 실패", e))?,
    );
    let user_service = web::Data::new(UserService::new(store, publisher.clone()));

    let shutdown = CancellationToken::new();
    let consumer = spawn_consumer(shutdown.clone())?;

    info!("✅ 모든 서비스가 성공적으로 초기화되었습니다!");

    // HTTP 서버는 SIGINT/SIGTERM을 받으면 정상 종료 후 반환된다
    let result = start_http_server(user_service).await;

    info!("🛑 종료 절차 시작");
    shutdown.cancel();
    if let Some(handle) = consumer {
        match handle.await {
            Ok(stats) => info!("✅ 컨슈머 종료: {:?}", stats),
            Err(e) => error!("❌ 컨슈머 태스크 종료 실패: {}", e),
        }
    }
    publisher.close().await;
    database.close().await;

    result
}

/// HTTP 서버를 구성하고 실행합니다
///
/// 미들웨어 순서: Rate Limiting → CORS → 요청 로깅 → 경로 정규화
///
/// # Errors
///
/// * `std::io::Error` - 포트 바인딩 실패 또는 서버 실행 오류
async fn start_http_server(user_service: web::Data<UserService>) -> io::Result<()> {
    let bind_address = format!("{}:{}", ServerConfig::host(), ServerConfig::port());

    info!("🌐 서버가 http://{} 에서 실행중입니다", bind_address);
    info!("📍 Health check: http://{}/health", bind_address);
    info!("📍 API: http://{}/api/v1/users", bind_address);

    // Rate Limiting 설정
    let rate_limit_config = load_rate_limit_config();
    let governor_conf = GovernorConfigBuilder::default()
        .requests_per_second(rate_limit_config.per_second)
        .burst_size(rate_limit_config.burst_size)
        .use_headers()
        .finish()
        .ok_or_else(|| startup_error("Rate Limiting 설정 실패", "per_second and burst_size must be non-zero"))?;

    info!(
        "🛡️ Rate Limiting 활성화: 초당 {}요청, 버스트 {}개",
        rate_limit_config.per_second,
        rate_limit_config.burst_size
    );

    HttpServer::new(move || {
        App::new()
            // Rate Limiting 미들웨어 (가장 먼저 적용)
            .wrap(Governor::new(&governor_conf))
            .wrap(configure_cors())
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())
            .app_data(user_service.clone())
            .configure(configure_all_routes)
    })
    .bind(bind_address)?
    .workers(ServerConfig::workers())
    .run()
    .await
}

/// 환경별 설정 파일을 로드합니다
///
/// # Environment Variables
///
/// * `PROFILE=dev` - .env.dev 파일 로드 (기본값)
/// * `PROFILE=prod` - .env.prod 파일 로드
/// * 기타 - 기본 .env 파일 로드
fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    match profile.as_str() {
        "prod" => {
            if let Err(e) = dotenv::from_filename(".env.prod") {
                eprintln!(".env.prod 파일 로드 실패: {}", e);
            }
        }
        "dev" => {
            if let Err(e) = dotenv::from_filename(".env.dev") {
                eprintln!(".env.dev 파일 로드 실패: {}", e);
            }
        }
        _ => {
            dotenv().ok();
        }
    }
}

/// 로깅 시스템을 초기화합니다
///
/// # Environment Variables
///
/// * `RUST_LOG` - 로깅 레벨 설정 (기본값: "info,actix_web=info")
///
/// ```bash
/// RUST_LOG=user_onboarding_service::messaging=debug cargo run
/// ```
fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=info"));
}

/// PostgreSQL 연결을 초기화하고, 설정된 경우 마이그레이션을 적용합니다
async fn initialize_database() -> io::Result<Database> {
    info!("📡 데이터베이스 연결 중...");

    let database = Database::new()
        .await
        .map_err(|e| startup_error("데이터베이스 연결 실패", e))?;

    if DatabaseConfig::run_migrations() {
        database
            .run_migrations()
            .await
            .map_err(|e| startup_error("마이그레이션 실패", e))?;
    }

    Ok(database)
}

/// 컨슈머가 활성화되어 있으면 구독 루프를 백그라운드 태스크로 시작합니다
fn spawn_consumer(shutdown: CancellationToken) -> io::Result<Option<JoinHandle<ConsumerStats>>> {
    if !KafkaConfig::consumer_enabled() {
        warn!("⚠️ Kafka 컨슈머 비활성화됨 (KAFKA_CONSUMER_ENABLED=false)");
        return Ok(None);
    }

    let mut subscriber = KafkaSubscriber::new(&KafkaConfig::brokers(), &KafkaConfig::topic(), &KafkaConfig::group_id())
        .map_err(|e| startup_error("Kafka 구독자 초기화 실패", e))?;
    let policy = KafkaConfig::consumer_policy();

    info!("📨 Kafka 컨슈머 시작: {:?}", policy);

    Ok(Some(actix_web::rt::spawn(async move {
        subscriber.consume(shutdown, &UserEventLogger, &policy).await
    })))
}

/// CORS 설정을 구성합니다
fn configure_cors() -> Cors {
    Cors::default()
        .allowed_origin("http://localhost:3000")
        .allowed_origin("http://127.0.0.1:3000")
        .allowed_origin("http://localhost:8080")
        .allowed_origin("http://127.0.0.1:8080")
        .allowed_methods(vec!["GET", "POST", "OPTIONS"])
        .allowed_headers(vec![header::ACCEPT, header::CONTENT_TYPE])
        .max_age(3600)
}

/// 환경변수에서 Rate Limiting 설정을 로드합니다
///
/// * `RATE_LIMIT_PER_SECOND` - 초당 허용 요청 수 (기본값: 100)
/// * `RATE_LIMIT_BURST_SIZE` - 버스트 허용량 (기본값: 200)
fn load_rate_limit_config() -> RateLimitConfig {
    let per_second = std::env::var("RATE_LIMIT_PER_SECOND")
        .unwrap_or_else(|_| "100".to_string())
        .parse::<u64>()
        .unwrap_or_else(|e| {
            error!("RATE_LIMIT_PER_SECOND 파싱 실패: {}. 기본값 100 사용", e);
            100
        });

    let burst_size = std::env::var("RATE_LIMIT_BURST_SIZE")
        .unwrap_or_else(|_| "200".to_string())
        .parse::<u32>()
        .unwrap_or_else(|e| {
            error!("RATE_LIMIT_BURST_SIZE 파싱 실패: {}. 기본값 200 사용", e);
            200
        });

    let config = RateLimitConfig { per_second, burst_size };

    info!("Rate Limiting 설정 로드됨: {:?}", config);
    config
}

fn startup_error(context: &str, e: impl std::fmt::Display) -> io::Error {
    error!("❌ {}: {}", context, e);
    io::Error::other(format!("{}: {}", context, e))
}
