use serde::Deserialize;

/// Perfil parcial guardado en localStorage bajo `user`.
/// Solo `type` es obligatorio; el resto lo rellena el API externo.
#[derive(Clone, PartialEq, Deserialize, Debug)]
pub struct UserProfile {
    #[serde(rename = "type")]
    pub role: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl UserProfile {
    pub fn has_role(&self, role: &str) -> bool {
        self.role == role
    }

    /// Nombre a mostrar en el header
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or(&self.role)
    }
}
