use services::AuthError;

/// Message shown when sign-in fails.
#[must_use]
pub fn login_error_message(err: &AuthError, min_password_len: usize) -> String {
    match err {
        AuthError::InvalidCredentials => format!(
            "Email ou senha inválidos. A senha deve ter pelo menos {min_password_len} caracteres."
        ),
        AuthError::Validation(_) => "Informe um email válido.".to_string(),
        _ => "Ocorreu um erro ao fazer login. Tente novamente.".to_string(),
    }
}

/// Message shown when a password reset request fails.
#[must_use]
pub fn reset_error_message(err: &AuthError) -> &'static str {
    match err {
        AuthError::Validation(_) => "Informe um email válido.",
        AuthError::ResetUnavailable => {
            "A recuperação de senha não está disponível neste modo de acesso."
        }
        _ => "Não foi possível enviar o email de recuperação. Tente novamente.",
    }
}

pub const RESET_SENT_NOTICE: &str =
    "Se o email estiver cadastrado, você receberá um link para redefinir sua senha.";
