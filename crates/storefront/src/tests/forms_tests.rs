use super::*;

#[test]
fn accepts_common_email_shapes() {
    assert!(is_valid_email("a@b.com"));
    assert!(is_valid_email("first.last+tag@mail.example.org"));
    assert!(is_valid_email("@b.com"));
}

#[test]
fn rejects_broken_email_shapes() {
    for bad in [
        "plain",
        "a@b",
        "a@@b.com",
        "a@b..com",
        "a b@c.com",
        "a@-b.com",
        "a@b.com-",
        "a(b)@c.com",
    ] {
        assert!(!is_valid_email(bad), "{bad} should be rejected");
    }
}

#[test]
fn login_reports_each_failing_field() {
    let errors = LoginForm {
        email: "",
        password: "",
    }
    .validate()
    .expect_err("invalid");
    assert_eq!(errors.fields.len(), 2);
    assert_eq!(errors.message_for("email"), Some("This field is required"));
    assert_eq!(
        errors.message_for("password"),
        Some("This field is required")
    );
}

#[test]
fn login_flags_malformed_email_as_type_mismatch() {
    let errors = LoginForm {
        email: "not-an-email",
        password: "secret",
    }
    .validate()
    .expect_err("invalid");
    assert_eq!(errors.message_for("email"), Some("Enter a valid format"));
    assert_eq!(errors.message_for("password"), None);
}

#[test]
fn login_accepts_valid_pair() {
    LoginForm {
        email: " a@b.com ",
        password: "x",
    }
    .validate()
    .expect("valid");
}

#[test]
fn signup_requires_name_of_two_characters() {
    let missing = SignupForm {
        email: "a@b.com",
        name: "   ",
    }
    .validate()
    .expect_err("missing name");
    assert_eq!(missing.message_for("name"), Some("This field is required"));

    let short = SignupForm {
        email: "a@b.com",
        name: "J",
    }
    .validate()
    .expect_err("short name");
    assert_eq!(short.message_for("name"), Some("Too short"));

    SignupForm {
        email: "a@b.com",
        name: "Jo",
    }
    .validate()
    .expect("valid");
}

#[test]
fn quiz_answer_is_required_numeric_and_in_range() {
    let quiz = |answer| QuizForm {
        answer,
        accepted: 1..=10,
    };

    assert_eq!(
        quiz("").validate().expect_err("empty").fields[0].violation,
        Violation::ValueMissing
    );
    assert_eq!(
        quiz("seven").validate().expect_err("text").fields[0].violation,
        Violation::TypeMismatch
    );
    assert_eq!(
        quiz("11").validate().expect_err("range").message_for("answer"),
        Some("Out of range")
    );
    assert_eq!(quiz(" 7 ").validate().expect("valid"), 7);
}

#[test]
fn validation_errors_render_field_messages() {
    let errors = LoginForm {
        email: "x",
        password: "",
    }
    .validate()
    .expect_err("invalid");
    assert_eq!(
        errors.to_string(),
        "invalid input: email: Enter a valid format; password: This field is required"
    );
}
