// KyoBrowser services
// Stateless helpers shared by the shell and the GUI layer.

pub mod address_resolver;
