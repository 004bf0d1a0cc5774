use std::collections::BTreeSet;

use chrono::{
  Datelike,
  NaiveDate,
  Weekday
};
use taskmaster_gui_shared::calendar::{
  month_grid,
  weekday_labels
};
use yew::{
  Callback,
  Html,
  Properties,
  classes,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct CalendarProps {
  pub month:      NaiveDate,
  pub today:      NaiveDate,
  pub selected:   NaiveDate,
  /// Days with at least one task created.
  pub marked:     BTreeSet<NaiveDate>,
  pub week_start: Weekday,
  pub on_shift:   Callback<i32>,
  pub on_pick:    Callback<NaiveDate>
}

#[function_component(Calendar)]
pub fn calendar(
  props: &CalendarProps
) -> Html {
  let title =
    props.month.format("%B %Y").to_string();
  let on_prev = {
    let on_shift = props.on_shift.clone();
    move |_| on_shift.emit(-1)
  };
  let on_next = {
    let on_shift = props.on_shift.clone();
    move |_| on_shift.emit(1)
  };

  let rows = month_grid(
    props.month,
    props.week_start
  );

  html! {
      <div class="panel calendar">
          <div class="panel-title">
              <button class="btn" onclick={on_prev}>{ "<" }</button>
              <span>{ title }</span>
              <button class="btn" onclick={on_next}>{ ">" }</button>
          </div>
          <div class="grid-7">
              {
                  for weekday_labels(props.week_start).into_iter().map(|label| html! {
                      <div class="weekday">{ label }</div>
                  })
              }
              {
                  for rows.iter().flat_map(|row| row.iter()).map(|cell| match cell {
                      Some(date) => {
                          let date = *date;
                          let class = classes!(
                              "day",
                              (date == props.today).then_some("today"),
                              (date == props.selected).then_some("selected"),
                              props.marked.contains(&date).then_some("marked")
                          );
                          let on_pick = props.on_pick.clone();
                          html! {
                              <div class={class} onclick={move |_| on_pick.emit(date)}>
                                  { date.day() }
                              </div>
                          }
                      }
                      None => html! { <div class="day blank"></div> },
                  })
              }
          </div>
      </div>
  }
}
