use chrono::NaiveDate;
use taskmaster_gui_shared::stats::QuickStats;
use yew::{
  Html,
  Properties,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct QuickStatsProps {
  pub stats:    QuickStats,
  pub day:      NaiveDate,
  pub is_today: bool
}

#[function_component(QuickStatsPanel)]
pub fn quick_stats_panel(
  props: &QuickStatsProps
) -> Html {
  let day_label = if props.is_today {
    "Tasks Today".to_string()
  } else {
    format!(
      "Tasks on {}",
      props.day.format("%b %-d")
    )
  };

  html! {
      <div class="panel stats">
          <div class="panel-title">{ "Quick Stats" }</div>
          <div class="stat">
              <span>{ day_label }</span>
              <strong>{ props.stats.created_on_day }</strong>
          </div>
          <div class="stat">
              <span>{ "Completed" }</span>
              <strong>{ format!("{}%", props.stats.completed_percent) }</strong>
          </div>
          <div class="stat">
              <span>{ "Total" }</span>
              <strong>{ props.stats.total }</strong>
          </div>
      </div>
  }
}
