//! Wire shapes of the school backend and their normalization into the flat
//! records the roster engine works with.
//!
//! Raw shapes declare only the fields we read. Anything else the backend
//! nests (students inside a class, the class inside those students, ...) is
//! skipped by serde, which is what breaks the cyclic graphs the backend can
//! emit.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::AppError;
use crate::models::{ClassRecord, ClassRef, CourseRef, Shift, StudentRecord};

#[derive(Debug, Deserialize)]
pub struct RawCourse {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub nome: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawClassRef {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub turno: Option<String>,
    #[serde(default)]
    pub data_inicio: Option<Value>,
    #[serde(default)]
    pub data_fim: Option<Value>,
    #[serde(default)]
    pub curso: Option<RawCourse>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawStudent {
    #[serde(default)]
    pub codigo: Option<i64>,
    #[serde(default)]
    pub nome: Option<String>,
    #[serde(default)]
    pub data_matricula: Option<Value>,
    #[serde(default)]
    pub mensalidade: Option<f64>,
    #[serde(default)]
    pub bolsista: Option<bool>,
    #[serde(default)]
    pub semestre: Option<i64>,
    #[serde(default)]
    pub cursos: Option<Vec<RawCourse>>,
    /// Older backends store a single course name per student.
    #[serde(default)]
    pub curso: Option<String>,
    #[serde(default)]
    pub turma: Option<RawClassRef>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawClass {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub turno: Option<String>,
    #[serde(default)]
    pub data_inicio: Option<Value>,
    #[serde(default)]
    pub data_fim: Option<Value>,
    #[serde(default)]
    pub cursos: Option<Vec<RawCourse>>,
    #[serde(default)]
    pub curso: Option<RawCourse>,
}

/// Accepts `YYYY-MM-DD`, a full ISO timestamp (the date part is used) or
/// epoch milliseconds.
pub fn parse_date(value: &Value) -> Option<NaiveDate> {
    match value {
        Value::String(s) => s
            .get(..10)
            .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok()),
        Value::Number(n) => n
            .as_i64()
            .and_then(DateTime::from_timestamp_millis)
            .map(|dt| dt.date_naive()),
        _ => None,
    }
}

fn course_refs(raw: Vec<RawCourse>) -> Vec<CourseRef> {
    raw.into_iter()
        .filter_map(|c| c.nome.map(|name| CourseRef { id: c.id, name }))
        .collect()
}

impl RawStudent {
    pub fn into_record(self) -> Result<StudentRecord, AppError> {
        let name = self
            .nome
            .ok_or_else(|| AppError::BadRequest(format!("Student {:?} has no name", self.codigo)))?;

        let mut courses = course_refs(self.cursos.unwrap_or_default());
        if courses.is_empty() {
            if let Some(legacy) = self.curso.filter(|c| !c.is_empty()) {
                courses.push(CourseRef::named(legacy));
            }
        }

        Ok(StudentRecord {
            id: self.codigo,
            name,
            enrollment_date: self.data_matricula.as_ref().and_then(parse_date),
            monthly_fee: self.mensalidade.unwrap_or(0.0),
            scholarship: self.bolsista.unwrap_or(false),
            term: self
                .semestre
                .and_then(|t| u32::try_from(t).ok())
                .unwrap_or(0),
            courses,
            class: self.turma.map(RawClassRef::into_link),
        })
    }
}

impl RawClassRef {
    pub fn into_link(self) -> ClassRef {
        ClassRef {
            id: self.id,
            shift: self.turno.as_deref().and_then(Shift::parse),
            start_date: self.data_inicio.as_ref().and_then(parse_date),
            end_date: self.data_fim.as_ref().and_then(parse_date),
            course: course_refs(self.curso.into_iter().collect()).pop(),
        }
    }
}

impl RawClass {
    /// Courses may arrive as a list or, from older payloads, as one object.
    pub fn into_record(self) -> ClassRecord {
        let mut courses = course_refs(self.cursos.unwrap_or_default());
        if courses.is_empty() {
            courses = course_refs(self.curso.into_iter().collect());
        }

        ClassRecord {
            id: self.id,
            shift: self.turno.as_deref().and_then(Shift::parse),
            start_date: self.data_inicio.as_ref().and_then(parse_date),
            end_date: self.data_fim.as_ref().and_then(parse_date),
            courses,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ClassLink {
    pub id: i64,
}

/// Student body sent to the backend. The class is referenced by id only.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentPayload<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub codigo: Option<i64>,
    pub nome: &'a str,
    pub data_matricula: Option<NaiveDate>,
    pub mensalidade: f64,
    pub bolsista: bool,
    pub semestre: u32,
    pub cursos: &'a [CourseRef],
    /// Single-course column of older backends.
    pub curso: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub turma: Option<ClassLink>,
}

impl<'a> From<&'a StudentRecord> for StudentPayload<'a> {
    fn from(student: &'a StudentRecord) -> Self {
        Self {
            codigo: student.id,
            nome: &student.name,
            data_matricula: student.enrollment_date,
            mensalidade: student.monthly_fee,
            bolsista: student.scholarship,
            semestre: student.term,
            cursos: &student.courses,
            curso: student.primary_course_name(),
            turma: student.class_id().map(|id| ClassLink { id }),
        }
    }
}

/// Class body sent to the backend. Never carries the student list.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassPayload<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub turno: Option<Shift>,
    pub cursos: Vec<ClassCourse<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_inicio: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_fim: Option<NaiveDate>,
}

/// The backend resolves class courses by name.
#[derive(Debug, Serialize)]
pub struct ClassCourse<'a> {
    pub nome: &'a str,
}

impl<'a> From<&'a ClassRecord> for ClassPayload<'a> {
    fn from(class: &'a ClassRecord) -> Self {
        Self {
            id: class.id,
            turno: class.shift,
            cursos: class
                .courses
                .iter()
                .map(|c| ClassCourse { nome: &c.name })
                .collect(),
            data_inicio: class.start_date,
            data_fim: class.end_date,
        }
    }
}

/// Turns the backend's "null assigned to a primitive" failure into a hint
/// naming the offending field.
pub fn diagnose_failure(body: &str) -> Option<String> {
    if !body.contains("Null value was assigned to a property") && !body.contains("primitive type") {
        return None;
    }
    let field = body
        .split("com.br.model.Aluno.")
        .nth(1)
        .and_then(|rest| rest.split(|c: char| !c.is_alphanumeric() && c != '_').next())
        .filter(|f| !f.is_empty())
        .unwrap_or("unknown");
    Some(format!(
        "backend stores student field `{}` as a primitive and cannot read null values",
        field
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn class_students_and_their_back_links_are_dropped() {
        let raw: RawClass = serde_json::from_value(json!({
            "id": 3,
            "turno": "Noturno",
            "dataInicio": "2025-01-06T00:00:00.000+00:00",
            "curso": { "id": 9, "nome": "Excel Avançado" },
            "alunos": [{ "codigo": 1, "nome": "Ana", "turma": { "id": 3, "alunos": [] } }]
        }))
        .unwrap();

        let class = raw.into_record();
        assert_eq!(class.shift, Some(Shift::Evening));
        assert_eq!(class.start_date, NaiveDate::from_ymd_opt(2025, 1, 6));
        assert_eq!(class.courses, vec![CourseRef { id: Some(9), name: "Excel Avançado".into() }]);
    }

    #[test]
    fn legacy_single_course_becomes_the_primary_course() {
        let raw: RawStudent = serde_json::from_value(json!({
            "codigo": 7,
            "nome": "João Silva",
            "curso": "Marketing Digital",
            "dataMatricula": 1736121600000i64,
            "semestre": 3
        }))
        .unwrap();

        let student = raw.into_record().unwrap();
        assert_eq!(student.primary_course_name(), "Marketing Digital");
        assert_eq!(student.enrollment_date, NaiveDate::from_ymd_opt(2025, 1, 6));
        assert!(!student.scholarship);
        assert_eq!(student.monthly_fee, 0.0);
    }

    #[test]
    fn student_class_link_keeps_dates_and_course() {
        let raw: RawStudent = serde_json::from_value(json!({
            "codigo": 4,
            "nome": "Maria Souza",
            "turma": {
                "id": 2,
                "turno": "Vespertino",
                "dataInicio": "2025-01-06",
                "dataFim": "2025-02-05T00:00:00.000+00:00",
                "curso": { "id": 5, "nome": "Excel Avançado" },
                "alunos": [{ "codigo": 4, "turma": { "id": 2 } }]
            }
        }))
        .unwrap();

        let link = raw.into_record().unwrap().class.unwrap();
        assert_eq!(link.id, Some(2));
        assert_eq!(link.shift, Some(Shift::Afternoon));
        assert_eq!(link.start_date, NaiveDate::from_ymd_opt(2025, 1, 6));
        assert_eq!(link.end_date, NaiveDate::from_ymd_opt(2025, 2, 5));
        assert_eq!(link.course.map(|c| c.name), Some("Excel Avançado".to_string()));
    }

    #[test]
    fn null_primitive_failure_names_the_field() {
        let body = "Null value was assigned to a property [class com.br.model.Aluno.bolsista] of primitive type";
        let hint = diagnose_failure(body).unwrap();
        assert!(hint.contains("`bolsista`"));
        assert!(diagnose_failure("some other failure").is_none());
    }
}
