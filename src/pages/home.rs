use leptos::prelude::*;

use crate::components::graph_editor::GraphEditor;

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="fullscreen-graph">
				<GraphEditor fullscreen=true />
				<div class="graph-overlay">
					<h1>"Graph Traversal"</h1>
					<p class="subtitle">"Place nodes, link them, then watch BFS or DFS walk the map."</p>
				</div>
			</div>
		</ErrorBoundary>
	}
}
