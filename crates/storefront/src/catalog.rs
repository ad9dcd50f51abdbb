use shared::domain::{Course, CourseId, Level};

#[derive(Debug, Clone)]
pub struct Catalog {
    courses: Vec<Course>,
}

impl Catalog {
    pub fn new(courses: Vec<Course>) -> Self {
        Self { courses }
    }

    /// The courses shipped with the demo storefront.
    pub fn builtin() -> Self {
        Self::new(vec![
            course("c-html", "Modern HTML & Semantics", 29.0, Level::Beginner, 6),
            course("c-css", "Responsive CSS with Flex/Grid", 39.0, Level::Beginner, 8),
            course("c-js", "JavaScript Essentials", 49.0, Level::Intermediate, 10),
            course("c-react", "React & State Management", 69.0, Level::Intermediate, 12),
        ])
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn find(&self, id: &CourseId) -> Option<&Course> {
        self.courses.iter().find(|c| &c.id == id)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn course(id: &str, title: &str, price: f64, level: Level, hours: u32) -> Course {
    Course {
        id: CourseId::from(id),
        title: title.to_string(),
        price,
        level,
        hours,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_lists_four_courses_in_order() {
        let catalog = Catalog::builtin();
        let ids: Vec<&str> = catalog.courses().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["c-html", "c-css", "c-js", "c-react"]);
    }

    #[test]
    fn finds_course_by_id() {
        let catalog = Catalog::builtin();
        let course = catalog.find(&CourseId::from("c-react")).expect("course");
        assert_eq!(course.price, 69.0);
        assert_eq!(course.level, Level::Intermediate);
        assert!(catalog.find(&CourseId::from("c-rust")).is_none());
    }
}
