use segmux_core::{params, MuxOptions, Request, Response, ServeMux, StatusCode};

const ROUTES: &[(&str, &str)] = &[
    ("GET/a/:a/b/:b/c/:c/d/:d/e/:e/f/:f/g/:g/h/:h", "/a/a/b/b/c/c/d/d/e/e/f/f/g/g/h/h"),
    ("GET/", "/"),
    ("GET/users", "/users"),
    ("GET/comments", "/comments/"),
    ("GET/users/cleanup", "/users/cleanup"),
    ("GET/users/:id", "/users/123"),
    ("GET/authorizations", "/authorizations"),
    ("GET/authorizations/:id", "/authorizations/1"),
    ("POST/authorizations", "/authorizations"),
    ("DELETE/authorizations/:id", "/authorizations/1"),
    ("GET/applications/:client_id/tokens/:access_token", "/applications/1/tokens/123456789"),
];

/// Each handler answers with the pattern it was registered under
fn mux() -> ServeMux {
    let mut mux = ServeMux::new(MuxOptions::default());
    for &(pattern, _) in ROUTES {
        mux.handle(pattern, move |req: Request| async move {
            if pattern.contains(':') && params(&req).path.is_none() {
                return Response::new(StatusCode::INTERNAL_SERVER_ERROR);
            }
            Response::text(pattern)
        })
        .unwrap();
    }
    mux
}

fn method_of(pattern: &str) -> &str {
    pattern.split('/').next().unwrap()
}

#[tokio::test]
async fn every_pattern_resolves_to_its_handler() {
    let mux = mux();
    for &(pattern, path) in ROUTES {
        let res = mux.dispatch(Request::new(method_of(pattern), path)).await;
        assert_eq!(res.status, StatusCode::OK, "{pattern} via {path}");
        assert_eq!(res.body_str(), Some(pattern), "{pattern} via {path}");
    }
}

#[tokio::test]
async fn static_segment_beats_parameter() {
    let mux = mux();
    let res = mux.dispatch(Request::new("GET", "/users/cleanup")).await;
    assert_eq!(res.body_str(), Some("GET/users/cleanup"));

    let res = mux.dispatch(Request::new("GET", "/users/cleanup2")).await;
    assert_eq!(res.body_str(), Some("GET/users/:id"));
}

#[tokio::test]
async fn parameters_follow_path_order() {
    let mut mux = ServeMux::default();
    mux.handle("GET/applications/:client_id/tokens/:access_token", |req: Request| async move {
        let bound: Vec<String> = req
            .path_params()
            .map(|p| p.iter().map(|(k, v)| format!("{k}={v}")).collect())
            .unwrap_or_default();
        Response::text(bound.join(","))
    })
    .unwrap();

    let res = mux
        .dispatch(Request::new("GET", "/applications/app-1/tokens/tok-9"))
        .await;
    assert_eq!(res.body_str(), Some("client_id=app-1,access_token=tok-9"));
}

#[tokio::test]
async fn wrong_path_and_wrong_method_are_not_found() {
    let mux = mux();
    for (method, path) in [
        ("GET", "/SOMETHING-THAT-DOES-NOT-EXISTS"),
        ("HEAD", "/SOMETHING-THAT-DOES-NOT-EXISTS"),
        ("HEAD", "/users"),
        ("GET", "/applications/1/tokens"),
        ("GET", "/users/123/extra"),
        ("PUT", "/authorizations/1"),
    ] {
        let res = mux.dispatch(Request::new(method, path)).await;
        assert_eq!(res.status, StatusCode::NOT_FOUND, "{method} {path}");
    }
}

#[tokio::test]
async fn empty_path_is_root() {
    let mux = mux();
    let res = mux.dispatch(Request::new("GET", "")).await;
    assert_eq!(res.body_str(), Some("GET/"));
}
