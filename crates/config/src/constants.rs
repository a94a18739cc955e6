//! Centralized constants for the webhook
//!
//! Reply texts are sent verbatim to the dialogue platform, so they are kept
//! here in one place. Templates use a `{name}` placeholder, filled with
//! [`render`].

/// Texts returned in `speech` / `displayText`
pub mod replies {
    pub const ATTRACTION_NOT_FOUND: &str = "Lo siento, no pude encontrar la información necesaria para responder tu duda. \
        Por favor, asegúrese que el nombre del atractivo este bien ingresado, o talvez esté \
        no pertenezca al centro histórico de la ciudad de Latacunga.";

    pub const SERVICE_NOT_FOUND: &str = "Lo siento, no pude encontrar la información necesaria para responder tu duda. \
        Por favor, asegúrese que el nombre del servicio este bien ingresado, o talvez esté \
        no pertenezca al centro historico de la ciudad de Latacunga.";

    /// Empty listing
    pub const LISTING_NOT_FOUND: &str =
        "Lo siento, no pude encontrar la información necesaria para responder tu duda.";

    pub const ATTRACTION_INFORMATION: &str = "Esta es la información que pude encontrar sobre el atractivo {name}. \
        ¿Te gustaría saber cómo llegar?";

    pub const ATTRACTION_ROUTE: &str = "Este es el camino que deberías tomar para llegar a {name}";

    pub const SERVICE_INFORMATION: &str = "Esta es la información que pude encontrar sobre el servicio {name}. \
        ¿Te gustaría saber cómo llegar?";

    pub const SERVICE_ROUTE: &str =
        "Este es el camino que deberías tomar para llegar al servicio {name}";

    pub const ATTRACTIONS_IN_AREA: &str = "Estos son los atractivos turísticos del centro histórico";

    pub const ATTRACTIONS_BY_SUBTYPE: &str =
        "Estos son los atractivos turísticos del centro histórico que pertenecen al sub tipo de {name}";

    // The trailing space is part of the deployed wording.
    pub const SERVICES_BY_ACTIVITY: &str =
        "Estos son algunos de los lugares que ofrecen servicio de {name} en la zona ";

    pub const OUTSIDE_HISTORIC_CENTER: &str = "Lo siento, no puedo brindarle información de estos atractivos turísticos, \
        porque no pertenecen al centro histórico de la ciudad de Latacunga. Sin embargo, te puedo mostrar las \
        siguientes agencias de viajes que hay en la zona.";

    pub const ACTION_NOT_IDENTIFIED: &str = "La acción no fue identificada";

    pub const STORE_UNAVAILABLE: &str = "Lo siento, en este momento no puedo consultar la información. \
        Por favor, inténtalo de nuevo más tarde.";

    pub const STORE_TIMEOUT: &str = "Lo siento, la consulta está tardando demasiado. \
        Por favor, inténtalo de nuevo en unos momentos.";
}

/// Defaults for the record store
pub mod store {
    /// Deadline around a single store query
    pub const DEFAULT_QUERY_TIMEOUT_MS: u64 = 5_000;
    pub const MIN_QUERY_TIMEOUT_MS: u64 = 100;
    pub const MAX_QUERY_TIMEOUT_MS: u64 = 60_000;
}

/// Defaults for the HTTP server
pub mod server {
    pub const DEFAULT_HOST: &str = "0.0.0.0";
    pub const DEFAULT_PORT: u16 = 8080;
    pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
}

/// Placeholder substituted by [`render`]
pub const NAME_PLACEHOLDER: &str = "{name}";

/// Fill the `{name}` placeholder of a reply template
pub fn render(template: &str, name: &str) -> String {
    template.replace(NAME_PLACEHOLDER, name)
}
