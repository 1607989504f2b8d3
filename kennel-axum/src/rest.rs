use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::rejection::JsonRejection,
    extract::{OriginalUri, Path, Query, State},
    http::{HeaderMap, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::MethodRouter,
    Json, Router,
};
use kennel_core::errors::KennelError;
use kennel_core::{KennelApp, ServiceCapabilities, ServiceMethodKind};
use serde::Serialize;
use serde_json::Value;

use crate::{
    params::{FromRestParams, RestParams},
    KennelAxumError, KennelAxumState,
};

fn map_json_rejection(rejection: JsonRejection) -> KennelAxumError {
    KennelError::bad_request("Failed to parse the request body as JSON")
        .with_errors(vec![rejection.body_text()])
        .into_anyhow()
        .into()
}

fn rest_params<P: FromRestParams>(
    service_name: &str,
    headers: &HeaderMap,
    query: HashMap<String, String>,
    method: &str,
    uri: &Uri,
) -> P {
    tracing::debug!(service = service_name, method, path = uri.path(), "rest call");
    P::from_rest_params(RestParams::from_parts(headers, query, method, uri))
}

/// 200 with the record, or 204 with no body when the service found nothing.
fn found_or_no_content<R: Serialize>(res: Option<R>) -> Response {
    match res {
        Some(record) => Json(record).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}

/// Mount a service as REST routes, honoring its capabilities.
///
/// | method | path    | service call | success            |
/// |--------|---------|--------------|--------------------|
/// | GET    | `/`     | find         | 200 array          |
/// | POST   | `/`     | create       | 201 record         |
/// | GET    | `/{id}` | get          | 200 record or 204  |
/// | PATCH  | `/{id}` | patch        | 200 record         |
/// | DELETE | `/{id}` | remove       | 200 record or 204  |
///
/// Methods outside the capabilities are not routed, so axum answers 405.
pub fn service_router<R, P>(
    service_name: Arc<String>,
    app: KennelApp<R, P>,
    capabilities: &ServiceCapabilities,
) -> Router<()>
where
    R: Serialize + Send + Sync + 'static,
    P: FromRestParams + Send + Sync + Clone + 'static,
{
    let state = KennelAxumState::new(app);

    let mut collection: Option<MethodRouter<KennelAxumState<R, P>>> = None;
    let mut member: Option<MethodRouter<KennelAxumState<R, P>>> = None;

    if capabilities.allows(ServiceMethodKind::Find) {
        let service_name = Arc::clone(&service_name);
        let route = axum::routing::get(
            move |State(state): State<KennelAxumState<R, P>>,
                  headers: HeaderMap,
                  Query(query): Query<HashMap<String, String>>,
                  OriginalUri(uri): OriginalUri| async move {
                let params = rest_params::<P>(&service_name, &headers, query, "GET", &uri);

                let svc = state.app.service(&service_name)?;
                let res = svc.find(params).await?;
                Ok::<_, KennelAxumError>(Json(res))
            },
        );
        collection = Some(route);
    }

    if capabilities.allows(ServiceMethodKind::Create) {
        let service_name = Arc::clone(&service_name);
        let handler = move |State(state): State<KennelAxumState<R, P>>,
                            headers: HeaderMap,
                            Query(query): Query<HashMap<String, String>>,
                            OriginalUri(uri): OriginalUri,
                            data: Result<Json<Value>, JsonRejection>| async move {
            let Json(data) = data.map_err(map_json_rejection)?;
            let params = rest_params::<P>(&service_name, &headers, query, "POST", &uri);

            let svc = state.app.service(&service_name)?;
            let res = svc.create(data, params).await?;
            Ok::<_, KennelAxumError>((StatusCode::CREATED, Json(res)))
        };
        collection = Some(match collection {
            Some(route) => route.post(handler),
            None => axum::routing::post(handler),
        });
    }

    if capabilities.allows(ServiceMethodKind::Get) {
        let service_name = Arc::clone(&service_name);
        let route = axum::routing::get(
            move |State(state): State<KennelAxumState<R, P>>,
                  headers: HeaderMap,
                  Query(query): Query<HashMap<String, String>>,
                  OriginalUri(uri): OriginalUri,
                  Path(id): Path<String>| async move {
                let params = rest_params::<P>(&service_name, &headers, query, "GET", &uri);

                let svc = state.app.service(&service_name)?;
                let res = svc.get(&id, params).await?;
                Ok::<_, KennelAxumError>(found_or_no_content(res))
            },
        );
        member = Some(route);
    }

    if capabilities.allows(ServiceMethodKind::Patch) {
        let service_name = Arc::clone(&service_name);
        let handler = move |State(state): State<KennelAxumState<R, P>>,
                            headers: HeaderMap,
                            Query(query): Query<HashMap<String, String>>,
                            OriginalUri(uri): OriginalUri,
                            Path(id): Path<String>,
                            data: Result<Json<Value>, JsonRejection>| async move {
            let params = rest_params::<P>(&service_name, &headers, query, "PATCH", &uri);

            let svc = state.app.service(&service_name)?;
            svc.check_id(&id)?;
            let Json(data) = data.map_err(map_json_rejection)?;
            let res = svc.patch(&id, data, params).await?;
            Ok::<_, KennelAxumError>(Json(res))
        };
        member = Some(match member {
            Some(route) => route.patch(handler),
            None => axum::routing::patch(handler),
        });
    }

    if capabilities.allows(ServiceMethodKind::Remove) {
        let service_name = Arc::clone(&service_name);
        let handler = move |State(state): State<KennelAxumState<R, P>>,
                            headers: HeaderMap,
                            Query(query): Query<HashMap<String, String>>,
                            OriginalUri(uri): OriginalUri,
                            Path(id): Path<String>| async move {
            let params = rest_params::<P>(&service_name, &headers, query, "DELETE", &uri);

            let svc = state.app.service(&service_name)?;
            let res = svc.remove(&id, params).await?;
            Ok::<_, KennelAxumError>(found_or_no_content(res))
        };
        member = Some(match member {
            Some(route) => route.delete(handler),
            None => axum::routing::delete(handler),
        });
    }

    let mut router = Router::new();
    if let Some(route) = collection {
        router = router.route("/", route);
    }
    if let Some(route) = member {
        router = router.route("/{id}", route);
    }
    router.with_state(state)
}
