use leptos::prelude::*;

const BUTTON_STYLE: &str = "display: flex; align-items: center; justify-content: center; width: 26px; height: 26px; \
	border: none; border-bottom: 1px solid #eee; background: #fefefe; cursor: pointer; padding: 0;";

/// Zoom in, zoom out and fit buttons.
#[component]
pub fn Controls(
	on_zoom_in: Callback<()>,
	on_zoom_out: Callback<()>,
	on_fit: Callback<()>,
) -> impl IntoView {
	view! {
		<div
			class="graph-view__controls"
			style="position: absolute; left: 15px; bottom: 15px; z-index: 5; box-shadow: 0 0 2px 1px rgba(0,0,0,0.08);"
			on:mousedown=|ev| ev.stop_propagation()
		>
			<button style=BUTTON_STYLE title="zoom in" aria-label="zoom in" on:click=move |_| on_zoom_in.run(())>
				<svg viewBox="0 0 32 32" width="12" height="12">
					<path d="M32 18.133H18.133V32h-4.266V18.133H0v-4.266h13.867V0h4.266v13.867H32z" />
				</svg>
			</button>
			<button style=BUTTON_STYLE title="zoom out" aria-label="zoom out" on:click=move |_| on_zoom_out.run(())>
				<svg viewBox="0 0 32 5" width="12" height="12">
					<path d="M0 0h32v4.2H0z" />
				</svg>
			</button>
			<button style=BUTTON_STYLE title="fit view" aria-label="fit view" on:click=move |_| on_fit.run(())>
				<svg viewBox="0 0 32 30" width="12" height="12">
					<path d="M3.692 4.63c0-.53.4-.938.939-.938h5.215V0H4.708C2.13 0 0 2.054 0 4.63v5.216h3.692V4.631zM27.354 0h-5.2v3.692h5.17c.53 0 .984.4.984.939v5.215H32V4.631A4.624 4.624 0 0027.354 0zm.954 24.83c0 .532-.4.94-.939.94h-5.215v3.768h5.215c2.577 0 4.631-2.13 4.631-4.707v-5.139h-3.692v5.139zm-23.677.94c-.531 0-.939-.4-.939-.94v-5.138H0v5.139c0 2.577 2.13 4.707 4.708 4.707h5.138V25.77H4.631z" />
				</svg>
			</button>
		</div>
	}
}
