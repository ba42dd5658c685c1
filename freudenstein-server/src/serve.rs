use actix_web::{
    error::InternalError,
    get,
    http::StatusCode,
    middleware, post,
    web::{self, Json},
    App, HttpResponse, HttpServer, ResponseError,
};
use freudenstein::{DomainError, GrashofClass, Linkage};
use serde::{Deserialize, Serialize};

const INDEX_HTML: &str = r#"<html>
<head><title>Four-bar position solver</title></head>
<body>
    <h1>Four-bar position solver</h1>
    <form id="form">
        a <input name="a" value="90" size="6">
        b <input name="b" value="35" size="6">
        c <input name="c" value="70" size="6">
        d <input name="d" value="70" size="6">
        theta2 <input name="theta2" value="30" size="6">
        <button>Compute</button>
    </form>
    <pre id="out"></pre>
    <script>
        document.getElementById('form').addEventListener('submit', async e => {
            e.preventDefault();
            const body = {};
            for (const [k, v] of new FormData(e.target)) body[k] = Number(v);
            const resp = await fetch('/compute', {
                method: 'POST',
                headers: { 'Content-Type': 'application/json' },
                body: JSON.stringify(body),
            });
            document.getElementById('out').textContent =
                JSON.stringify(await resp.json(), null, 2);
        });
    </script>
</body>
</html>"#;

#[derive(Deserialize)]
struct ComputeReq {
    a: Option<f64>,
    b: Option<f64>,
    c: Option<f64>,
    d: Option<f64>,
    theta2: Option<f64>,
}

#[derive(Serialize)]
struct ComputeResp {
    grashof: GrashofClass,
    theta31: Option<f64>,
    theta32: Option<f64>,
    theta41: Option<f64>,
    theta42: Option<f64>,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, thiserror::Error)]
enum ComputeError {
    #[error("Missing one of the required fields: a, b, c, d, theta2")]
    MissingField,
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl ResponseError for ComputeError {
    fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody { error: self.to_string() })
    }
}

// Malformed JSON and non-numeric fields get the same `{"error": ...}` shape
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _| {
        let body = ErrorBody { error: err.to_string() };
        InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
    })
}

#[get("/")]
async fn index() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(INDEX_HTML)
}

#[post("/compute")]
async fn compute(json: Json<ComputeReq>) -> Result<Json<ComputeResp>, ComputeError> {
    let ComputeReq { a, b, c, d, theta2 } = json.into_inner();
    let (Some(a), Some(b), Some(c), Some(d), Some(theta2)) = (a, b, c, d, theta2) else {
        return Err(ComputeError::MissingField);
    };
    let fb = Linkage::new(a, b, c, d);
    let pos = fb.solve(theta2)?;
    tracing::debug!(a, b, c, d, theta2, "computed");
    Ok(Json(ComputeResp {
        grashof: fb.grashof(),
        theta31: pos.theta3.open,
        theta32: pos.theta3.crossed,
        theta41: pos.theta4.open,
        theta42: pos.theta4.crossed,
    }))
}

pub(crate) async fn serve(port: u16) -> std::io::Result<()> {
    tracing::info!("Serve at: http://localhost:{port}/");
    tracing::info!("Press Ctrl+C to close the server...");
    HttpServer::new(|| {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(json_config())
            .service(index)
            .service(compute)
    })
    .bind(("localhost", port))?
    .run()
    .await
}
