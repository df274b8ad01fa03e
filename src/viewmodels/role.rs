// ============================================================================
// ROLE - Flag de rol privilegiado derivado del perfil persistido
// ============================================================================

use crate::models::UserProfile;
use crate::services::session_store::SessionStore;
use crate::utils::constants::STORAGE_KEY_USER;
use crate::utils::storage::load_json;

/// Perfil guardado bajo `user`; ausente o mal formado => `None`
pub fn current_profile<S: SessionStore + ?Sized>(store: &S) -> Option<UserProfile> {
    load_json(store, STORAGE_KEY_USER)
}

/// `true` solo si `user.type == privileged_role`.
/// Nunca falla: perfil ausente o inválido => `false`.
pub fn get_role_flag<S: SessionStore + ?Sized>(store: &S, privileged_role: &str) -> bool {
    current_profile(store).map_or(false, |profile| profile.has_role(privileged_role))
}
