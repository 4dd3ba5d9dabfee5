//! Full-screen sheet shown over the page, toggled through its `show` class.

use yew::{html, Component, Context, Html, NodeRef, Properties};

const SHOW_CLASS: &str = "show";

pub struct YwMaterialTopSheet {
    pub id: String,
}

#[derive(Properties, PartialEq)]
pub struct Props {
    #[prop_or_default]
    pub children: Html,
    pub node_ref: NodeRef,
}

impl Component for YwMaterialTopSheet {
    type Message = ();
    type Properties = Props;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            id: format!("sheet-{}", uuid::Uuid::new_v4().simple()),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <div class="top-sheet" id={self.id.clone()} ref={ctx.props().node_ref.clone()}>
                { ctx.props().children.clone() }
            </div>
        }
    }
}

pub fn open_top_sheet(top_sheet_ref: &NodeRef) {
    if let Some(sheet) = top_sheet_ref.cast::<web_sys::Element>() {
        sheet.class_list().add_1(SHOW_CLASS).ok();
    }
}

pub fn close_top_sheet(top_sheet_ref: &NodeRef) {
    if let Some(sheet) = top_sheet_ref.cast::<web_sys::Element>() {
        sheet.class_list().remove_1(SHOW_CLASS).ok();
    }
}
