use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use contracts::api::API_ROOT;

use crate::state::AppState;
use crate::{handlers, system};

/// Конфигурация всех роутов приложения
pub fn configure_routes(state: AppState) -> Router {
    // ========================================
    // PUBLIC ROUTES
    // ========================================
    let public = Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/auth/login", post(system::handlers::auth::login));

    // ========================================
    // PROTECTED ROUTES (Bearer token)
    // ========================================
    let protected = Router::new()
        .route("/auth/me", get(system::handlers::auth::current_user))
        // Instances
        .route("/instance/list", get(handlers::instance::list_instances))
        .route("/instance/create", post(handlers::instance::create_instance))
        .route(
            "/instance/:uuid",
            delete(handlers::instance::remove_instance),
        )
        .route(
            "/instance/:uuid/info",
            get(handlers::instance::get_instance_info),
        )
        .route(
            "/instance/:uuid/events",
            get(handlers::instance::get_instance_events),
        )
        // Game settings
        .route(
            "/instance/:uuid/game",
            get(handlers::game_setting::list_game_settings),
        )
        .route(
            "/instance/:uuid/game/:setting",
            get(handlers::game_setting::get_game_setting)
                .put(handlers::game_setting::set_game_setting),
        )
        // Instance files
        .route(
            "/instance/:uuid/fs/ls",
            get(handlers::instance_fs::list_instance_files),
        )
        .route(
            "/instance/:uuid/fs/read",
            get(handlers::instance_fs::read_instance_file),
        )
        .route(
            "/instance/:uuid/fs/write",
            put(handlers::instance_fs::write_instance_file),
        )
        .route(
            "/instance/:uuid/fs/new",
            put(handlers::instance_fs::new_instance_file),
        )
        .route(
            "/instance/:uuid/fs/mkdir",
            put(handlers::instance_fs::make_instance_directory),
        )
        .route(
            "/instance/:uuid/fs/move",
            put(handlers::instance_fs::move_instance_file),
        )
        .route(
            "/instance/:uuid/fs/rm",
            delete(handlers::instance_fs::remove_instance_file),
        )
        .route(
            "/instance/:uuid/fs/rmdir",
            delete(handlers::instance_fs::remove_instance_dir),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            system::auth::middleware::require_auth,
        ));

    Router::new()
        .nest(API_ROOT, public.merge(protected))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::instance::InstanceRegistry;
    use crate::shared::config::AuthConfig;
    use crate::system::auth::jwt::{self, JwtKeys};
    use crate::system::auth::users::UserStore;
    use crate::system::auth::AuthService;
    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use contracts::api;
    use contracts::instance::{GameSettingEntry, InstanceInfo};
    use contracts::shared::error::{ErrorBody, ErrorKind};
    use contracts::system::auth::LoginResponse;
    use http_body_util::BodyExt;
    use std::sync::Arc;
    use tower::ServiceExt;

    const SECRET: &str = "routes-test-secret";

    async fn test_state(dir: &std::path::Path) -> AppState {
        let users = UserStore::from_config(&AuthConfig {
            admin_username: "admin".into(),
            admin_password: "admin".into(),
            jwt_secret: Some(SECRET.into()),
        })
        .unwrap();
        AppState {
            instances: InstanceRegistry::load(dir).await.unwrap(),
            auth: Arc::new(AuthService {
                keys: JwtKeys::from_secret(SECRET),
                users,
            }),
        }
    }

    fn token() -> String {
        jwt::generate_access_token(&JwtKeys::from_secret(SECRET), "1", "admin", true).unwrap()
    }

    fn url(path: &str) -> String {
        format!("{}{}", API_ROOT, path)
    }

    fn authed(method: Method, path: &str, body: Body) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(url(path))
            .header(header::AUTHORIZATION, format!("Bearer {}", token()))
            .header(header::CONTENT_TYPE, "application/json")
            .body(body)
            .unwrap()
    }

    async fn body_text(response: axum::response::Response) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    async fn create(app: &Router, name: &str, port: u32) -> String {
        let body = serde_json::json!({
            "type": "minecraft",
            "name": name,
            "port": port,
            "version": "1.20.4",
            "flavour": "vanilla",
        });
        let response = app
            .clone()
            .oneshot(authed(
                Method::POST,
                api::instance_create_path(),
                Body::from(body.to_string()),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        serde_json::from_str(&body_text(response).await).unwrap()
    }

    #[tokio::test]
    async fn test_health_is_public() {
        let dir = tempfile::tempdir().unwrap();
        let app = configure_routes(test_state(dir.path()).await);
        let response = app
            .oneshot(
                Request::builder()
                    .uri(url(api::health_path()))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "ok");
    }

    #[tokio::test]
    async fn test_instance_routes_require_token() {
        let dir = tempfile::tempdir().unwrap();
        let app = configure_routes(test_state(dir.path()).await);

        let no_token = Request::builder()
            .uri(url(&api::game_setting_path("any", "motd")))
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(no_token).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let bad_token = Request::builder()
            .uri(url(api::instance_list_path()))
            .header(header::AUTHORIZATION, "Bearer not-a-jwt")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(bad_token).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_login_then_me() {
        let dir = tempfile::tempdir().unwrap();
        let app = configure_routes(test_state(dir.path()).await);

        let login = Request::builder()
            .method(Method::POST)
            .uri(url(api::login_path()))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"username":"admin","password":"admin"}"#))
            .unwrap();
        let response = app.clone().oneshot(login).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let login: LoginResponse = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(login.user.username, "admin");

        let me = Request::builder()
            .uri(url(api::current_user_path()))
            .header(header::AUTHORIZATION, format!("Bearer {}", login.access_token))
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(me).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let wrong = Request::builder()
            .method(Method::POST)
            .uri(url(api::login_path()))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"username":"admin","password":"nope"}"#))
            .unwrap();
        let response = app.oneshot(wrong).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body: ErrorBody = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(body.kind, ErrorKind::Unauthorized);
        assert_eq!(body.detail, "Invalid username or password");
    }

    #[tokio::test]
    async fn test_game_setting_plain_body() {
        let dir = tempfile::tempdir().unwrap();
        let app = configure_routes(test_state(dir.path()).await);
        let uuid = create(&app, "survival", 25565).await;

        let response = app
            .clone()
            .oneshot(authed(
                Method::GET,
                &api::game_setting_path(&uuid, "motd"),
                Body::empty(),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "Pizza time");

        let response = app
            .clone()
            .oneshot(authed(
                Method::PUT,
                &api::game_setting_path(&uuid, "motd"),
                Body::from("Welcome home"),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .clone()
            .oneshot(authed(
                Method::GET,
                &api::game_setting_path(&uuid, "motd"),
                Body::empty(),
            ))
            .await
            .unwrap();
        assert_eq!(body_text(response).await, "Welcome home");

        let response = app
            .clone()
            .oneshot(authed(
                Method::GET,
                &api::game_settings_path(&uuid),
                Body::empty(),
            ))
            .await
            .unwrap();
        let all: Vec<GameSettingEntry> =
            serde_json::from_str(&body_text(response).await).unwrap();
        assert!(all
            .iter()
            .any(|e| e.name == "server-port" && e.value == "25565"));

        let response = app
            .oneshot(authed(
                Method::GET,
                &api::game_setting_path(&uuid, "unknown-setting"),
                Body::empty(),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let error: ErrorBody = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(error.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_create_list_remove() {
        let dir = tempfile::tempdir().unwrap();
        let app = configure_routes(test_state(dir.path()).await);
        let uuid = create(&app, "creative", 25570).await;

        // Повтор порта отклоняется
        let body = serde_json::json!({
            "type": "minecraft", "name": "other", "port": 25570,
            "version": "1.20.4", "flavour": "fabric",
        });
        let response = app
            .clone()
            .oneshot(authed(
                Method::POST,
                api::instance_create_path(),
                Body::from(body.to_string()),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = app
            .clone()
            .oneshot(authed(Method::GET, api::instance_list_path(), Body::empty()))
            .await
            .unwrap();
        let list: Vec<InstanceInfo> = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].uuid, uuid);

        let response = app
            .clone()
            .oneshot(authed(Method::DELETE, &api::instance_path(&uuid), Body::empty()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(authed(Method::GET, &api::instance_info_path(&uuid), Body::empty()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_files_stay_inside_instance() {
        let dir = tempfile::tempdir().unwrap();
        let app = configure_routes(test_state(dir.path()).await);
        let uuid = create(&app, "files", 25580).await;

        let response = app
            .clone()
            .oneshot(authed(
                Method::GET,
                &format!("{}?path=", api::instance_fs_ls_path(&uuid)),
                Body::empty(),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let text = body_text(response).await;
        assert!(text.contains("server.properties"));

        let response = app
            .clone()
            .oneshot(authed(
                Method::GET,
                &format!("{}?path=server.properties", api::instance_fs_read_path(&uuid)),
                Body::empty(),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("motd=Pizza time"));

        let response = app
            .oneshot(authed(
                Method::GET,
                &format!("{}?path=..%2F..%2Fetc", api::instance_fs_ls_path(&uuid)),
                Body::empty(),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_file_manager_operations() {
        let dir = tempfile::tempdir().unwrap();
        let app = configure_routes(test_state(dir.path()).await);
        let uuid = create(&app, "manager", 25581).await;

        let send = |method: Method, path: String, body: &'static str| {
            let app = app.clone();
            async move {
                app.oneshot(authed(method, &path, Body::from(body)))
                    .await
                    .unwrap()
                    .status()
            }
        };

        let status = send(
            Method::PUT,
            format!("{}?path=plugins", api::instance_fs_mkdir_path(&uuid)),
            "",
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let status = send(
            Method::PUT,
            format!("{}?path=plugins%2Fa.yml", api::instance_fs_write_path(&uuid)),
            "enabled: true",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let written = dir.path().join("manager").join("plugins").join("a.yml");
        assert_eq!(std::fs::read_to_string(&written).unwrap(), "enabled: true");

        let status = send(
            Method::PUT,
            format!(
                "{}?from=plugins%2Fa.yml&to=plugins%2Fb.yml",
                api::instance_fs_move_path(&uuid)
            ),
            "",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(!written.exists());

        let status = send(
            Method::DELETE,
            format!("{}?path=plugins%2Fb.yml", api::instance_fs_rm_path(&uuid)),
            "",
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let status = send(
            Method::DELETE,
            format!("{}?path=", api::instance_fs_rmdir_path(&uuid)),
            "",
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let status = send(
            Method::PUT,
            format!("{}?path=..%2Fescape.txt", api::instance_fs_new_path(&uuid)),
            "",
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert!(!dir.path().join("escape.txt").exists());

        let status = send(
            Method::DELETE,
            format!("{}?path=plugins", api::instance_fs_rmdir_path(&uuid)),
            "",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(!dir.path().join("manager").join("plugins").exists());

        let response = app
            .oneshot(authed(Method::GET, &api::instance_events_path(&uuid), Body::empty()))
            .await
            .unwrap();
        let events = body_text(response).await;
        assert!(events.contains("Directory plugins created"));
        assert!(events.contains("Moved plugins/a.yml to plugins/b.yml"));
    }
}
