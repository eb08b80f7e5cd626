//! User-facing chat text.

use dealwatch_core::DealRecord;

pub const WELCOME: &str = "Bot attivo! Usa /setinterval <secondi> per cambiare l'intervallo, \
/run per avviare e /stop per fermare.";
pub const SET_INTERVAL_USAGE: &str = "Uso corretto: /setinterval <secondi>";
pub const POLLING_STOPPED: &str = "Polling fermato.";
pub const NOTHING_TO_STOP: &str = "Nessun polling attivo.";
pub const NO_DEALS: &str = "Nessuna offerta trovata in questo momento.";
pub const TICK_FAILURE: &str = "Errore durante il controllo delle offerte.";

#[must_use]
pub fn interval_set(secs: u64) -> String {
    format!("Intervallo impostato a {secs} secondi.")
}

#[must_use]
pub fn polling_started(secs: u64) -> String {
    format!("Polling avviato ogni {secs} secondi.")
}

/// Renders one deal as a chat message.
#[must_use]
pub fn format_deal(deal: &DealRecord) -> String {
    format!(
        "[ {} ]\n€ {}\nOfferta del {}\nDurata: {}\n{}",
        deal.product_name, deal.price, deal.discount_label, deal.remaining_duration, deal.link
    )
}
