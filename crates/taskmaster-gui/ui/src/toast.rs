use std::rc::Rc;

use gloo::timers::callback::Timeout;
use taskmaster_gui_shared::notify::{
  Toast,
  ToastKind,
  ToastQueue
};
use yew::prelude::ContextProvider;
use yew::{
  Callback,
  Html,
  Properties,
  Reducible,
  UseReducerHandle,
  function_component,
  hook,
  html,
  use_context,
  use_effect_with,
  use_reducer
};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ToastStore {
  queue: ToastQueue
}

pub enum ToastAction {
  Push(ToastKind, String),
  Dismiss(u64)
}

impl Reducible for ToastStore {
  type Action = ToastAction;

  fn reduce(
    self: Rc<Self>,
    action: Self::Action
  ) -> Rc<Self> {
    let mut queue = self.queue.clone();
    match action {
      | ToastAction::Push(kind, message) => {
        queue.push(kind, message);
      }
      | ToastAction::Dismiss(id) => {
        queue.dismiss(id);
      }
    }
    Rc::new(Self { queue })
  }
}

pub type ToastContext =
  UseReducerHandle<ToastStore>;

/// Handle for raising toasts from
/// callbacks and async tasks.
#[derive(Clone, PartialEq)]
pub struct Notifier {
  handle: ToastContext
}

impl Notifier {
  pub fn info(
    &self,
    message: impl Into<String>
  ) {
    self.handle.dispatch(
      ToastAction::Push(
        ToastKind::Info,
        message.into()
      )
    );
  }

  pub fn success(
    &self,
    message: impl Into<String>
  ) {
    self.handle.dispatch(
      ToastAction::Push(
        ToastKind::Success,
        message.into()
      )
    );
  }

  pub fn error(
    &self,
    message: impl Into<String>
  ) {
    let message = message.into();
    tracing::warn!(message = %message, "surfacing error toast");
    self.handle.dispatch(
      ToastAction::Push(
        ToastKind::Error,
        message
      )
    );
  }
}

#[hook]
pub fn use_notifier() -> Notifier {
  let handle =
    use_context::<ToastContext>().expect(
      "use_notifier called outside \
       ToastProvider"
    );
  Notifier { handle }
}

#[derive(Properties, PartialEq)]
pub struct ToastProviderProps {
  pub toast_ms: u32,
  #[prop_or_default]
  pub children: Html
}

#[function_component(ToastProvider)]
pub fn toast_provider(
  props: &ToastProviderProps
) -> Html {
  let store =
    use_reducer(ToastStore::default);
  let on_dismiss = {
    let store = store.clone();
    Callback::from(move |id: u64| {
      store.dispatch(
        ToastAction::Dismiss(id)
      );
    })
  };

  html! {
      <ContextProvider<ToastContext> context={store.clone()}>
          { props.children.clone() }
          <div class="toasts">
              {
                  for store.queue.toasts().iter().cloned().map(|toast| html! {
                      <ToastItem
                          key={toast.id}
                          toast={toast.clone()}
                          toast_ms={props.toast_ms}
                          on_dismiss={on_dismiss.clone()}
                      />
                  })
              }
          </div>
      </ContextProvider<ToastContext>>
  }
}

#[derive(Properties, PartialEq)]
struct ToastItemProps {
  toast:      Toast,
  toast_ms:   u32,
  on_dismiss: Callback<u64>
}

#[function_component(ToastItem)]
fn toast_item(
  props: &ToastItemProps
) -> Html {
  let id = props.toast.id;

  {
    let on_dismiss =
      props.on_dismiss.clone();
    let toast_ms = props.toast_ms;
    use_effect_with(id, move |id| {
      let id = *id;
      let timeout =
        Timeout::new(toast_ms, move || {
          on_dismiss.emit(id);
        });
      move || drop(timeout)
    });
  }

  let on_click = {
    let on_dismiss =
      props.on_dismiss.clone();
    Callback::from(move |_| {
      on_dismiss.emit(id)
    })
  };

  html! {
      <div class={props.toast.kind.css_class()} onclick={on_click}>
          { &props.toast.message }
      </div>
  }
}
