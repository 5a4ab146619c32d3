use chrono::NaiveDate;
use escola_admin::models::{ClassRecord, ClassRef, CourseRef, Shift, StudentRecord};
use escola_admin::roster::{
    self, ClassFilter, ClassFilterParams, ClassRoster, StudentFilter, StudentFilterParams,
    TermStatus, UNSPECIFIED_SHIFT, apply_filters,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn student(
    id: i64,
    name: &str,
    courses: &[&str],
    scholarship: bool,
    term: u32,
    fee: f64,
) -> StudentRecord {
    StudentRecord {
        id: Some(id),
        name: name.to_string(),
        enrollment_date: Some(date(2025, 1, 6)),
        monthly_fee: fee,
        scholarship,
        term,
        courses: courses.iter().map(|c| CourseRef::named(*c)).collect(),
        class: None,
    }
}

fn in_class(mut student: StudentRecord, class_id: i64) -> StudentRecord {
    student.class = Some(ClassRef::new(class_id, Some(Shift::Morning)));
    student
}

fn roster_fixture() -> Vec<StudentRecord> {
    vec![
        in_class(student(1, "João Silva", &["Marketing Digital"], true, 3, 300.0), 1),
        in_class(
            student(
                2,
                "Maria Souza",
                &["Excel Avançado", "Curso Antigo de Digitação"],
                false,
                6,
                200.0,
            ),
            2,
        ),
        student(3, "Ana Lima", &["Marketing Digital"], true, 7, 100.0),
    ]
}

fn names(records: &[&StudentRecord]) -> Vec<String> {
    records.iter().map(|s| s.name.clone()).collect()
}

#[test]
fn test_empty_filter_returns_everything_in_order() {
    let students = roster_fixture();
    let filter = StudentFilter::default();

    let visible = apply_filters(&students, &filter);

    assert!(filter.is_empty());
    assert_eq!(visible.len(), students.len());
    for (kept, original) in visible.iter().zip(students.iter()) {
        assert_eq!(*kept, original);
    }
}

#[test]
fn test_name_filter_is_case_insensitive_substring() {
    let students = roster_fixture();
    let filter = StudentFilter {
        name: Some("João".to_string()),
        ..Default::default()
    };

    let visible = apply_filters(&students, &filter);
    assert_eq!(names(&visible), vec!["João Silva"]);

    let filter = StudentFilter {
        name: Some("SOUZA".to_string()),
        ..Default::default()
    };
    assert_eq!(names(&apply_filters(&students, &filter)), vec!["Maria Souza"]);
}

#[test]
fn test_scholarship_filter_from_query_string() {
    let students = vec![
        student(1, "A", &[], true, 1, 10.0),
        student(2, "B", &[], false, 1, 10.0),
        student(3, "C", &[], true, 1, 10.0),
    ];
    let filter = StudentFilter::from(StudentFilterParams {
        scholarship: Some("true".to_string()),
        ..Default::default()
    });

    let visible = apply_filters(&students, &filter);

    assert_eq!(visible.len(), 2);
    assert!(visible.iter().all(|s| s.scholarship));
}

#[test]
fn test_course_filter_matches_any_course_exactly() {
    let students = roster_fixture();
    let filter = StudentFilter {
        course: Some("Curso Antigo de Digitação".to_string()),
        ..Default::default()
    };
    assert_eq!(names(&apply_filters(&students, &filter)), vec!["Maria Souza"]);

    let filter = StudentFilter {
        course: Some("marketing digital".to_string()),
        ..Default::default()
    };
    assert!(apply_filters(&students, &filter).is_empty());
}

#[test]
fn test_predicates_combine_with_and() {
    let students = roster_fixture();
    let filter = StudentFilter {
        course: Some("Marketing Digital".to_string()),
        term: Some(7),
        scholarship: Some(true),
        ..Default::default()
    };

    assert_eq!(names(&apply_filters(&students, &filter)), vec!["Ana Lima"]);
}

#[test]
fn test_class_id_filter_excludes_students_without_class() {
    let students = roster_fixture();
    let filter = StudentFilter {
        class_id: Some(1),
        ..Default::default()
    };

    assert_eq!(names(&apply_filters(&students, &filter)), vec!["João Silva"]);
}

#[test]
fn test_unparseable_params_match_everything() {
    let students = roster_fixture();
    let filter = StudentFilter::from(StudentFilterParams {
        name: Some(String::new()),
        term: Some("abc".to_string()),
        scholarship: Some("maybe".to_string()),
        class_id: Some("x".to_string()),
        ..Default::default()
    });

    assert!(filter.is_empty());
    assert_eq!(apply_filters(&students, &filter).len(), 3);
}

#[test]
fn test_clear_resets_every_criterion() {
    let students = roster_fixture();
    let mut filter = StudentFilter {
        name: Some("zzz".to_string()),
        term: Some(9),
        ..Default::default()
    };
    assert!(apply_filters(&students, &filter).is_empty());

    filter.clear();

    assert_eq!(filter, StudentFilter::default());
    assert_eq!(apply_filters(&students, &filter).len(), 3);
}

#[test]
fn test_statistics_cover_the_full_collection() {
    let students = roster_fixture();

    let stats = roster::student_stats(&students);

    assert_eq!(stats.total, 3);
    assert_eq!(stats.scholarship_count, 2);
    // "Curso Antigo de Digitação" is not a catalog title.
    assert_eq!(stats.distinct_courses, 2);
    assert!((stats.average_fee - 200.0).abs() < 1e-9);
}

#[test]
fn test_average_fee_of_empty_collection_is_zero() {
    assert_eq!(roster::average_fee(&[]), 0.0);
    assert_eq!(roster::student_stats(&[]).average_fee, 0.0);
}

#[test]
fn test_classes_per_shift_counts_unspecified() {
    let classes = vec![
        ClassRecord::new(Some(1), Some(Shift::Morning)),
        ClassRecord::new(Some(2), Some(Shift::Morning)),
        ClassRecord::new(Some(3), Some(Shift::Evening)),
        ClassRecord::new(Some(4), None),
    ];

    let counts = roster::classes_per_shift(&classes);

    assert_eq!(counts.get("Matutino"), Some(&2));
    assert_eq!(counts.get("Noturno"), Some(&1));
    assert_eq!(counts.get(UNSPECIFIED_SHIFT), Some(&1));
    assert_eq!(counts.get("Vespertino"), None);
}

#[test]
fn test_status_from_term_boundaries() {
    assert_eq!(roster::status_from_term(1), TermStatus::Beginner);
    assert_eq!(roster::status_from_term(2), TermStatus::Beginner);
    assert_eq!(roster::status_from_term(3), TermStatus::Intermediate);
    assert_eq!(roster::status_from_term(4), TermStatus::Intermediate);
    assert_eq!(roster::status_from_term(5), TermStatus::Advanced);
    assert_eq!(roster::status_from_term(6), TermStatus::Advanced);
    assert_eq!(roster::status_from_term(7), TermStatus::FinalStage);
    assert_eq!(roster::status_from_term(10), TermStatus::FinalStage);
    assert_eq!(TermStatus::FinalStage.label(), "Final-stage");

    let mut previous = roster::status_from_term(0);
    for term in 1..=12 {
        let current = roster::status_from_term(term);
        assert!(current >= previous);
        previous = current;
    }
}

#[test]
fn test_active_enrollment_uses_the_given_date() {
    let as_of = date(2025, 6, 1);

    assert!(roster::is_active(date(2024, 1, 1), as_of));
    assert!(!roster::is_active(date(2023, 6, 1), as_of));
    assert!(!roster::is_active(date(2020, 1, 1), as_of));
}

#[test]
fn test_discounted_fee() {
    let scholar = student(1, "A", &[], true, 1, 400.0);
    let regular = student(2, "B", &[], false, 1, 400.0);

    assert_eq!(roster::discounted_fee(&scholar, None), 200.0);
    assert_eq!(roster::discounted_fee(&scholar, Some(0.25)), 300.0);
    assert_eq!(roster::discounted_fee(&scholar, Some(0.0)), 400.0);
    assert_eq!(roster::discounted_fee(&regular, None), 400.0);
    assert_eq!(roster::discounted_fee(&regular, Some(0.0)), 400.0);
    assert_eq!(roster::discounted_fee(&regular, Some(1.0)), 400.0);
}

#[test]
fn test_primary_course_adapter() {
    let mut s = student(1, "A", &["Excel Avançado", "Marketing Digital"], false, 1, 10.0);
    assert_eq!(s.primary_course_name(), "Excel Avançado");

    s.set_primary_course_name("Introdução à IA");
    assert_eq!(s.courses.len(), 2);
    assert_eq!(s.courses[0].name, "Introdução à IA");
    assert_eq!(s.courses[1].name, "Marketing Digital");

    s.set_primary_course_name("");
    assert!(s.courses.is_empty());
    assert_eq!(s.primary_course_name(), "");

    s.set_primary_course_name("Informática Básica");
    assert_eq!(s.courses, vec![CourseRef::named("Informática Básica")]);
}

#[test]
fn test_class_filter_by_student_name_uses_reverse_index() {
    let students = roster_fixture();
    let classes = vec![
        ClassRecord::new(Some(1), Some(Shift::Morning)),
        ClassRecord::new(Some(2), Some(Shift::Evening)),
        ClassRecord::new(Some(3), Some(Shift::Evening)),
    ];
    let roster = ClassRoster::build(&students);

    let filter = ClassFilter::from(ClassFilterParams {
        student_name: Some("maria".to_string()),
        ..Default::default()
    });
    let visible = apply_filters(&classes, &filter.bind(&roster));
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].id, Some(2));

    let filter = ClassFilter::from(ClassFilterParams {
        shift: Some("noturno".to_string()),
        ..Default::default()
    });
    let visible = apply_filters(&classes, &filter.bind(&roster));
    assert_eq!(visible.iter().map(|c| c.id).collect::<Vec<_>>(), vec![Some(2), Some(3)]);

    let filter = ClassFilter::from(ClassFilterParams {
        shift: Some("Integral".to_string()),
        ..Default::default()
    });
    assert!(filter.is_empty());
}

#[test]
fn test_reverse_index_and_enrollment_cap() {
    let mut students: Vec<StudentRecord> = (1..=20)
        .map(|i| in_class(student(i, &format!("Aluno {}", i), &[], false, 1, 10.0), 5))
        .collect();
    students.push(student(21, "Fora", &[], false, 1, 10.0));

    let roster = ClassRoster::build(&students);
    assert_eq!(roster.count(Some(5)), 20);
    assert!(roster.is_at_capacity(Some(5)));
    assert_eq!(roster.student_ids(Some(5)).len(), 20);
    assert_eq!(roster.count(None), 0);

    assert!(!roster::has_room_for(&students, 5, None));
    assert!(!roster::has_room_for(&students, 5, Some(21)));
    assert!(roster::has_room_for(&students, 5, Some(3)));
    assert!(roster::has_room_for(&students, 6, None));
}

#[test]
fn test_classes_derived_from_students_are_unique_and_sorted() {
    let students = vec![
        in_class(student(1, "A", &[], false, 1, 10.0), 9),
        in_class(student(2, "B", &[], false, 1, 10.0), 4),
        in_class(student(3, "C", &[], false, 1, 10.0), 9),
        student(4, "D", &[], false, 1, 10.0),
    ];

    let classes = roster::classes_from_students(&students);

    assert_eq!(classes.iter().map(|c| c.id).collect::<Vec<_>>(), vec![Some(4), Some(9)]);
    assert_eq!(classes[0].shift, Some(Shift::Morning));
}

#[test]
fn test_derived_classes_keep_dates_and_course_of_the_link() {
    let mut linked = student(1, "A", &["Excel Avançado"], false, 1, 10.0);
    linked.class = Some(ClassRef {
        start_date: Some(date(2025, 1, 6)),
        end_date: Some(date(2025, 2, 5)),
        course: Some(CourseRef::named("Excel Avançado")),
        ..ClassRef::new(5, Some(Shift::Afternoon))
    });
    let students = vec![linked];

    let classes = roster::classes_from_students(&students);
    assert_eq!(classes.len(), 1);
    assert_eq!(classes[0].start_date, Some(date(2025, 1, 6)));
    assert_eq!(classes[0].end_date, Some(date(2025, 2, 5)));
    assert!(classes[0].has_course("Excel Avançado"));

    let roster = ClassRoster::build(&students);
    let filter = ClassFilter::from(ClassFilterParams {
        course: Some("Excel Avançado".into()),
        ..Default::default()
    });
    assert_eq!(apply_filters(&classes, &filter.bind(&roster)).len(), 1);
}
