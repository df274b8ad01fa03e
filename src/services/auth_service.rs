// ============================================================================
// AUTH SERVICE - Persistencia de la sesión (sign-in externo / sign-out)
// ============================================================================
// El token lo emite el API externo; aquí solo se guarda y se borra.
// ============================================================================

use crate::models::UserProfile;
use crate::services::session_store::{SessionError, SessionWriter};
use crate::utils::constants::{STORAGE_KEY_AUTH_TOKEN, STORAGE_KEY_USER};

/// Guardar la sesión recibida por la página de sign-in.
/// Solo se rechaza el token vacío: el guard trata cualquier otro valor como
/// sesión, sin recortar espacios. `user_json` se guarda tal cual; si no es un perfil válido solo se avisa
/// (el flag de rol degradará a "no privilegiado").
pub fn persist_sign_in<W: SessionWriter + ?Sized>(
    writer: &W,
    token: &str,
    user_json: Option<&str>,
) -> Result<(), SessionError> {
    if token.is_empty() {
        return Err(SessionError::EmptyToken);
    }

    writer.set(STORAGE_KEY_AUTH_TOKEN, token)?;

    match user_json {
        Some(json) => {
            if serde_json::from_str::<UserProfile>(json).is_err() {
                log::warn!("⚠️ [AUTH] Perfil de usuario sin 'type' válido, se guarda igualmente");
            }
            writer.set(STORAGE_KEY_USER, json)?;
        }
        None => writer.remove(STORAGE_KEY_USER)?,
    }

    log::info!("✅ [AUTH] Sesión guardada");
    Ok(())
}

/// Borrar token y perfil. Las otras pestañas reciben el evento `storage`.
pub fn sign_out<W: SessionWriter + ?Sized>(writer: &W) -> Result<(), SessionError> {
    writer.remove(STORAGE_KEY_AUTH_TOKEN)?;
    writer.remove(STORAGE_KEY_USER)?;
    log::info!("👋 [AUTH] Sesión cerrada");
    Ok(())
}
