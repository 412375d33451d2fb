use crate::model::employee::Employee;

/// In-memory employee roster. Owned by the composition root and read-only
/// to the derivation engine.
#[derive(Debug, Default)]
pub struct Roster {
    employees: Vec<Employee>,
    revision: u64,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Demo roster used when no upstream employee feed is configured.
    pub fn seeded() -> Self {
        let mut roster = Self::new();
        for (id, name, department) in [
            ("EMP-001", "John Doe", "Engineering"),
            ("EMP-002", "Jane Smith", "Engineering"),
            ("EMP-003", "Arif Hossain", "Finance"),
            ("EMP-004", "Maria Garcia", "Human Resources"),
            ("EMP-005", "Wei Chen", "Operations"),
        ] {
            roster.add(Employee {
                id: id.to_string(),
                name: name.to_string(),
                department: department.to_string(),
                is_active: true,
            });
        }
        roster
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn add(&mut self, employee: Employee) {
        self.employees.push(employee);
        self.revision += 1;
    }

    pub fn all(&self) -> &[Employee] {
        &self.employees
    }

    pub fn active(&self) -> impl Iterator<Item = &Employee> {
        self.employees.iter().filter(|e| e.is_active)
    }

    pub fn get(&self, id: &str) -> Option<&Employee> {
        self.employees.iter().find(|e| e.id == id)
    }

    pub fn name_of(&self, id: &str) -> Option<&str> {
        self.get(id).map(|e| e.name.as_str())
    }
}
