pub mod serve_gcloud;
pub mod serve_sonarqube;
