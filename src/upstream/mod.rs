pub mod dto;
pub mod memory;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use tracing::{debug, warn};

use crate::config::AppConfig;
use crate::error::AppError;
use crate::models::{ClassRecord, StudentRecord};

pub use memory::InMemorySchoolBackend;

/// The school-management backend that owns persistence. Records come back
/// already normalized; see [`dto`].
#[async_trait]
pub trait SchoolBackend: Send + Sync {
    async fn list_students(&self) -> Result<Vec<StudentRecord>, AppError>;
    async fn get_student(&self, id: i64) -> Result<StudentRecord, AppError>;
    async fn create_student(&self, student: &StudentRecord) -> Result<(), AppError>;
    async fn update_student(&self, id: i64, student: &StudentRecord) -> Result<(), AppError>;
    async fn delete_student(&self, id: i64) -> Result<(), AppError>;

    async fn list_classes(&self) -> Result<Vec<ClassRecord>, AppError>;
    async fn get_class(&self, id: i64) -> Result<ClassRecord, AppError>;
    async fn create_class(&self, class: &ClassRecord) -> Result<(), AppError>;
    async fn update_class(&self, id: i64, class: &ClassRecord) -> Result<(), AppError>;
    async fn delete_class(&self, id: i64) -> Result<(), AppError>;
}

/// Record identifiers are positive; anything else never reaches the backend.
pub fn ensure_valid_id(id: i64) -> Result<i64, AppError> {
    if id <= 0 {
        return Err(AppError::BadRequest(format!("Invalid record id: {}", id)));
    }
    Ok(id)
}

pub struct HttpSchoolBackend {
    client: Client,
    base_url: String,
}

impl HttpSchoolBackend {
    pub fn new(config: &AppConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(config.backend_timeout)
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build http client: {}", e)))?;
        Ok(Self {
            client,
            base_url: config.backend_url.clone(),
        })
    }

    fn url(&self, resource: &str, id: Option<i64>) -> String {
        match id {
            Some(id) => format!("{}/{}/{}", self.base_url, resource, id),
            None => format!("{}/{}", self.base_url, resource),
        }
    }

    async fn check(response: Response) -> Result<Response, AppError> {
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(AppError::NotFound);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = dto::diagnose_failure(&body).unwrap_or(body);
            return Err(AppError::UpstreamStatus {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response)
    }

    async fn send_json<T: serde::Serialize + ?Sized>(
        &self,
        method: reqwest::Method,
        url: String,
        body: &T,
    ) -> Result<(), AppError> {
        debug!("{} {}", method, url);
        let response = self.client.request(method, &url).json(body).send().await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn delete(&self, url: String) -> Result<(), AppError> {
        debug!("DELETE {}", url);
        let response = self.client.delete(&url).send().await?;
        Self::check(response).await?;
        Ok(())
    }
}

#[async_trait]
impl SchoolBackend for HttpSchoolBackend {
    async fn list_students(&self) -> Result<Vec<StudentRecord>, AppError> {
        let response = self.client.get(self.url("alunos", None)).send().await?;
        let raw: Vec<dto::RawStudent> = Self::check(response).await?.json().await?;

        let mut students = Vec::with_capacity(raw.len());
        for item in raw {
            match item.into_record() {
                Ok(student) => students.push(student),
                Err(e) => warn!("Skipping student from backend: {}", e),
            }
        }
        Ok(students)
    }

    async fn get_student(&self, id: i64) -> Result<StudentRecord, AppError> {
        let url = self.url("alunos", Some(ensure_valid_id(id)?));
        let response = self.client.get(url).send().await?;
        let raw: dto::RawStudent = Self::check(response).await?.json().await?;
        raw.into_record()
    }

    async fn create_student(&self, student: &StudentRecord) -> Result<(), AppError> {
        let payload = dto::StudentPayload::from(student);
        self.send_json(reqwest::Method::POST, self.url("alunos", None), &payload)
            .await
    }

    async fn update_student(&self, id: i64, student: &StudentRecord) -> Result<(), AppError> {
        let url = self.url("alunos", Some(ensure_valid_id(id)?));
        let payload = dto::StudentPayload::from(student);
        self.send_json(reqwest::Method::PUT, url, &payload).await
    }

    async fn delete_student(&self, id: i64) -> Result<(), AppError> {
        self.delete(self.url("alunos", Some(ensure_valid_id(id)?)))
            .await
    }

    async fn list_classes(&self) -> Result<Vec<ClassRecord>, AppError> {
        let response = self.client.get(self.url("turmas", None)).send().await?;
        let raw: Vec<dto::RawClass> = Self::check(response).await?.json().await?;
        Ok(raw.into_iter().map(dto::RawClass::into_record).collect())
    }

    async fn get_class(&self, id: i64) -> Result<ClassRecord, AppError> {
        let url = self.url("turmas", Some(ensure_valid_id(id)?));
        let response = self.client.get(url).send().await?;
        let raw: dto::RawClass = Self::check(response).await?.json().await?;
        Ok(raw.into_record())
    }

    async fn create_class(&self, class: &ClassRecord) -> Result<(), AppError> {
        let payload = dto::ClassPayload::from(class);
        self.send_json(reqwest::Method::POST, self.url("turmas", None), &payload)
            .await
    }

    async fn update_class(&self, id: i64, class: &ClassRecord) -> Result<(), AppError> {
        let url = self.url("turmas", Some(ensure_valid_id(id)?));
        let payload = dto::ClassPayload::from(class);
        self.send_json(reqwest::Method::PUT, url, &payload).await
    }

    async fn delete_class(&self, id: i64) -> Result<(), AppError> {
        self.delete(self.url("turmas", Some(ensure_valid_id(id)?)))
            .await
    }
}
