use std::time::Instant;

use actix_web::http::header::ContentType;
use actix_web::{web, HttpResponse, Responder};
use adoption_inference::{FeatureVector, FormError, Prediction};
use log::{error, info, warn};

use crate::inference::{self, ModelState};
use crate::models::{ApiResponse, FormInputs, ModelInfo};
use crate::render::{self, Outcome};

/// Routes for the form and the JSON API. Static files are mounted by the caller.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index))
        .route("/predict", web::get().to(index))
        .route("/predict", web::post().to(predict_form))
        .service(
            web::scope("/api")
                .route("/health", web::get().to(health_check))
                .route("/model-info", web::get().to(model_info))
                .route("/predict", web::post().to(predict_json)),
        );
}

fn html(body: String) -> HttpResponse {
    HttpResponse::Ok().content_type(ContentType::html()).body(body)
}

fn unavailable(err: &FormError) -> HttpResponse {
    HttpResponse::ServiceUnavailable()
        .content_type(ContentType::html())
        .body(render::unavailable_page(err))
}

async fn index(state: web::Data<ModelState>) -> impl Responder {
    match state.unavailable() {
        Some(err) => unavailable(err),
        None => html(render::form_page(&FeatureVector::default(), Outcome::Idle)),
    }
}

async fn predict_form(
    state: web::Data<ModelState>,
    form: web::Form<FormInputs>,
) -> impl Responder {
    let model = match state.classifier() {
        Ok(model) => model,
        Err(err) => {
            warn!("Prediction requested but model is unavailable");
            return unavailable(err);
        }
    };

    let features = match form.read() {
        Ok(features) => features,
        Err(err) => {
            warn!("Rejected form input: {}", err);
            return html(render::form_page(&form.lenient(), Outcome::Failed(&err)));
        }
    };

    match inference::predict(model, features).await {
        Ok(prediction) => {
            info!("Prediction: label={} ({})", prediction.label, prediction.text);
            html(render::form_page(&features, Outcome::Card(&prediction)))
        }
        Err(err) => {
            error!("{} {}", err, err.detail().unwrap_or_default());
            html(render::form_page(&features, Outcome::Failed(&err)))
        }
    }
}

async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(ApiResponse::success("Renewable adoption predictor"))
}

async fn model_info(state: web::Data<ModelState>) -> impl Responder {
    let status = match state.unavailable() {
        Some(err) => Err(err),
        None => Ok(()),
    };
    let info = ModelInfo::new(state.path().display().to_string(), status);
    HttpResponse::Ok().json(ApiResponse::success(info))
}

async fn predict_json(
    state: web::Data<ModelState>,
    req: web::Json<FeatureVector>,
) -> impl Responder {
    let start_time = Instant::now();
    let model = match state.classifier() {
        Ok(model) => model,
        Err(err) => {
            return HttpResponse::ServiceUnavailable()
                .json(ApiResponse::<Prediction>::error(&err.to_string()).timed(start_time));
        }
    };

    match inference::predict(model, req.into_inner()).await {
        Ok(prediction) => {
            info!("API prediction: label={} ({})", prediction.label, prediction.text);
            HttpResponse::Ok().json(ApiResponse::success(prediction).timed(start_time))
        }
        Err(err) => {
            error!("API {} {}", err, err.detail().unwrap_or_default());
            let message = match err.detail() {
                Some(detail) => format!("{} {}", err, detail),
                None => err.to_string(),
            };
            HttpResponse::InternalServerError()
                .json(ApiResponse::<Prediction>::error(&message).timed(start_time))
        }
    }
}
