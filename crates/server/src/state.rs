use transitmap::model::Model;

pub struct AppState {
    pub model: Model,
}

impl AppState {
    pub fn new(model: Model) -> Self {
        Self { model }
    }
}
