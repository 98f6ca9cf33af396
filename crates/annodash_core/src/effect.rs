use crate::Generation;

/// Network work requested by `update`. Each effect yields exactly one
/// completion `Msg`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    LoadTasks { generation: Generation },
    UpdateStatus { id: String },
    DeleteTask { id: String },
    LookupAbstract { generation: Generation, query: String },
    FetchAbstractCatalog,
}
