// dates.rs
//! Etiquetas legibles para la fecha de una transacción.
//!
//! La fecha se compara en su propio desfase horario, no en el del equipo.
use chrono::{DateTime, Days, FixedOffset, NaiveDate};

const SHORT_DATE: &str = "%d/%m/%Y";
const SHORT_TIME: &str = "%H:%M";

/// "Today", "Yesterday" o la fecha corta (`dd/mm/yyyy`).
pub fn date_label(date: DateTime<FixedOffset>, today: NaiveDate) -> String {
  let day = date.date_naive();
  if day == today {
    "Today".to_string()
  } else if today.checked_sub_days(Days::new(1)) == Some(day) {
    "Yesterday".to_string()
  } else {
    date.format(SHORT_DATE).to_string()
  }
}

/// Hora corta (`HH:MM`).
pub fn time_label(date: DateTime<FixedOffset>) -> String {
  date.format(SHORT_TIME).to_string()
}

/// "<fecha> / <hora>", usado en la cabecera de descripción.
pub fn date_and_time_label(date: DateTime<FixedOffset>, today: NaiveDate) -> String {
  format!("{} / {}", date_label(date, today), time_label(date))
}
