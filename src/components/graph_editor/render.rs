use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::state::Session;
use super::style::{
	self, BACKGROUND, EDGE_COLOR, GRID_COLOR, Grid, LABEL_COLOR, NODE_RADIUS,
};

/// Redraws the whole frame from the session snapshot.
pub fn render(session: &Session, ctx: &CanvasRenderingContext2d) {
	let _ = ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, session.width(), session.height());
	draw_grid(session, ctx);

	let view = session.view();
	let _ = ctx.set_transform(view.k, 0.0, 0.0, view.k, view.x, view.y);
	draw_edges(session, ctx);
	draw_nodes(session, ctx);
	let _ = ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);
}

fn draw_grid(session: &Session, ctx: &CanvasRenderingContext2d) {
	let grid = Grid::for_view(session.view());
	ctx.set_fill_style_str(GRID_COLOR);
	for (x, y) in grid.dots(session.width(), session.height()) {
		ctx.begin_path();
		let _ = ctx.arc(x, y, grid.dot_radius, 0.0, 2.0 * PI);
		ctx.fill();
	}
}

fn draw_edges(session: &Session, ctx: &CanvasRenderingContext2d) {
	let graph = session.graph();
	ctx.set_line_width(style::edge_width(session.view().k));
	ctx.set_stroke_style_str(EDGE_COLOR);
	ctx.set_shadow_blur(0.0);

	for edge in graph.edges() {
		let (Some(n1), Some(n2)) = (graph.node(edge.u), graph.node(edge.v)) else {
			continue;
		};
		ctx.begin_path();
		ctx.move_to(n1.x, n1.y);
		ctx.line_to(n2.x, n2.y);
		ctx.stroke();
	}
}

fn draw_nodes(session: &Session, ctx: &CanvasRenderingContext2d) {
	let k = session.view().k;
	let pending = session.controller().pending();
	let font = style::label_font(k);

	for (idx, node) in session.graph().nodes().iter().enumerate() {
		let look = style::node_style(node.state, pending == Some(idx), session.time(), k);

		ctx.begin_path();
		let _ = ctx.arc(node.x, node.y, NODE_RADIUS, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(look.fill);
		ctx.set_stroke_style_str(look.stroke);
		ctx.set_shadow_color(look.glow_color);
		ctx.set_shadow_blur(look.glow_blur);
		ctx.set_line_width(look.line_width);
		ctx.fill();
		ctx.stroke();
		ctx.set_shadow_blur(0.0);

		ctx.set_fill_style_str(LABEL_COLOR);
		ctx.set_font(&font);
		ctx.set_text_align("center");
		ctx.set_text_baseline("middle");
		let _ = ctx.fill_text(style::truncate_label(&node.label), node.x, node.y);
	}
}
