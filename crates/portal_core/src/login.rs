use shared::domain::Role;

/// Credentials form offered on the role screen. Credentials are not verified.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub role: Option<Role>,
    pub email: String,
    pub password: String,
    pub show_password: bool,
}

impl LoginForm {
    pub fn can_submit(&self) -> bool {
        self.role.is_some() && !self.email.is_empty() && !self.password.is_empty()
    }

    pub fn submit(&self) -> Option<Role> {
        if self.can_submit() {
            self.role
        } else {
            None
        }
    }

    pub fn button_label(&self) -> String {
        let who = self.role.map(Role::label).unwrap_or("User");
        format!("Sign In as {who}")
    }

    pub fn masked_password(&self) -> String {
        if self.show_password {
            self.password.clone()
        } else {
            "•".repeat(self.password.chars().count())
        }
    }
}
