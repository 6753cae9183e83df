#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewError {
    /// Progress could not be saved.
    SaveFailed,
}

impl ViewError {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            ViewError::SaveFailed => "Não foi possível salvar seu progresso. Tente novamente.",
        }
    }
}
