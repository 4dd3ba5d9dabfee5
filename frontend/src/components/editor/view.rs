//! View of the template editor: details card, formatting toolbar, and three
//! tabs (Markdown source, live preview, field overrides).
//!
//! The preview shows each placeholder as a labeled blank block, exactly as a
//! printed form would, using the field list the server will derive on save.

use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::html::Scope;
use yew::prelude::*;
use yew::virtual_dom::AttrValue;

use common::form::invalid_pattern;
use common::model::field::{Field, FieldType};
use common::render::render_preview;

use crate::markdown;
use crate::tops_sheet::yw_material_top_sheet::YwMaterialTopSheet;

use super::helpers::{format_options, parse_options, Style};
use super::messages::Msg;
use super::state::{MetaField, Tab, TemplateEditor};

pub fn view(editor: &TemplateEditor, ctx: &Context<TemplateEditor>) -> Html {
    let link = ctx.link();
    if editor.loading {
        return html! { <p class="muted">{ editor.app.tr("Chargement...", "جار التحميل...") }</p> };
    }

    html! {
        <div class="editor-root">
            { build_details(editor, link) }
            { build_toolbar(editor, link) }
            { build_tab_bar(editor, link) }
            {
                match editor.active_tab {
                    Tab::Editor => build_editor_tab(editor, link),
                    Tab::Preview => build_preview_tab(editor),
                    Tab::Fields => build_fields_tab(editor, link),
                }
            }
            { pdf_sheet(editor, link) }
        </div>
    }
}

fn meta_input(link: &Scope<TemplateEditor>, label: &str, value: String, field: MetaField, dir: &'static str) -> Html {
    html! {
        <div class="form-field">
            <label>{ label.to_string() }</label>
            <input
                {dir}
                {value}
                oninput={link.callback(move |e: InputEvent| {
                    Msg::SetMeta(field, e.target_unchecked_into::<HtmlInputElement>().value())
                })}
            />
        </div>
    }
}

fn build_details(editor: &TemplateEditor, link: &Scope<TemplateEditor>) -> Html {
    let app = &editor.app;
    let input = &editor.input;
    html! {
        <div class="card">
            <h2>
                {
                    if editor.template_id.is_some() {
                        app.tr("Modifier le modèle", "تعديل النموذج")
                    } else {
                        app.tr("Nouveau modèle", "نموذج جديد")
                    }
                }
            </h2>
            <div class="grid">
                { meta_input(link, "Nom (FR)", input.name.clone(), MetaField::Name, "ltr") }
                { meta_input(link, "الاسم (AR)", input.name_ar.clone(), MetaField::NameAr, "rtl") }
                { meta_input(link, "Description (FR)", input.description.clone(), MetaField::Description, "ltr") }
                { meta_input(link, "الوصف (AR)", input.description_ar.clone(), MetaField::DescriptionAr, "rtl") }
                <div class="form-field">
                    <label>{ app.tr("Catégorie", "الفئة") }</label>
                    <select onchange={link.callback(|e: Event| {
                        Msg::SetMeta(MetaField::Category, e.target_unchecked_into::<HtmlSelectElement>().value())
                    })}>
                        { for editor.categories.iter().map(|category| html! {
                            <option value={category.id.clone()} selected={category.id == input.category_id}>
                                { category.name_in(app.locale) }
                            </option>
                        }) }
                    </select>
                </div>
                { meta_input(link, app.tr("Ordre", "الترتيب"), input.order.to_string(), MetaField::Order, "ltr") }
                { meta_input(link, app.tr("Durée estimée", "المدة المقدرة"), input.estimated_time.clone(), MetaField::EstimatedTime, "auto") }
                <div class="form-field">
                    <label>
                        <input
                            type="checkbox"
                            checked={input.is_active}
                            onchange={link.callback(|e: Event| {
                                Msg::SetActive(e.target_unchecked_into::<HtmlInputElement>().checked())
                            })}
                        />
                        { " " }{ app.tr("Publié", "منشور") }
                    </label>
                </div>
            </div>
        </div>
    }
}

fn build_toolbar(editor: &TemplateEditor, link: &Scope<TemplateEditor>) -> Html {
    let app = &editor.app;
    let style = |s: Style| link.callback(move |_| Msg::ApplyStyle(s));
    html! {
        <div class="icon-toolbar">
            { icon_button("undo", app.tr("Annuler", "تراجع"), link.callback(|_| Msg::Undo)) }
            { icon_button("redo", app.tr("Rétablir", "إعادة"), link.callback(|_| Msg::Redo)) }
            { icon_button("title", app.tr("Titre", "عنوان"), style(Style::Heading)) }
            { icon_button("format_bold", app.tr("Gras", "غامق"), style(Style::Bold)) }
            { icon_button("format_italic", app.tr("Italique", "مائل"), style(Style::Italic)) }
            { icon_button("format_list_bulleted", app.tr("Liste", "قائمة"), style(Style::BulletList)) }
            { icon_button("horizontal_rule", app.tr("Ligne", "خط"), style(Style::Rule)) }
            { icon_button("input", app.tr("Champ", "حقل"), style(Style::Field)) }
            { icon_button("picture_as_pdf", "PDF", link.callback(|_| Msg::OpenPdf)) }
            {
                if editor.saving {
                    icon_button("hourglass_empty", app.tr("Patientez", "انتظر"), Callback::noop())
                } else {
                    icon_button("save", app.tr("Enregistrer", "حفظ"), link.callback(|_| Msg::Save))
                }
            }
        </div>
    }
}

/// Tab bar; a red dot on the editor tab marks unsaved changes.
fn build_tab_bar(editor: &TemplateEditor, link: &Scope<TemplateEditor>) -> Html {
    let app = &editor.app;
    let tab_button = |tab: Tab, label: &'static str| {
        html! {
            <button
                class={classes!("tab-btn", (editor.active_tab == tab).then_some("active"))}
                onclick={link.callback(move |_| Msg::SetTab(tab))}
                style="position: relative;"
            >
                { label }
                {
                    if tab == Tab::Editor && editor.is_dirty() {
                        html! {
                            <span
                                title={app.tr("Modifications non enregistrées", "تعديلات غير محفوظة")}
                                style="position:absolute;top:4px;right:6px;width:8px;height:8px;background:#e53935;border-radius:50%;"
                            />
                        }
                    } else {
                        html! {}
                    }
                }
            </button>
        }
    };
    html! {
        <div class="tab-bar">
            { tab_button(Tab::Editor, app.tr("Éditeur", "المحرر")) }
            { tab_button(Tab::Preview, app.tr("Aperçu", "معاينة")) }
            { tab_button(Tab::Fields, app.tr("Champs", "الحقول")) }
        </div>
    }
}

fn build_editor_tab(editor: &TemplateEditor, link: &Scope<TemplateEditor>) -> Html {
    let line_count = editor.text.lines().count().max(1);
    let line_numbers = (1..=line_count)
        .map(|n| html! { <div class="line-number">{ n }</div> })
        .collect::<Html>();

    html! {
        <div style="display: flex; align-items: flex-start;">
            <div
                class="line-numbers"
                style="user-select:none; text-align:right; padding:8px 4px 8px 0; color:#aaa; font-size:11px; font-family:monospace; min-width:32px;"
            >
                { line_numbers }
            </div>
            <textarea
                ref={editor.textarea_ref.clone()}
                value={editor.text.clone()}
                dir="auto"
                spellcheck="false"
                oninput={link.batch_callback(|e: InputEvent| {
                    let value = e.target_unchecked_into::<HtmlTextAreaElement>().value();
                    vec![Msg::UpdateText(value), Msg::AutoResize]
                })}
                onkeydown={link.batch_callback(|e: KeyboardEvent| {
                    if e.ctrl_key() && e.key() == "z" {
                        e.prevent_default();
                        vec![Msg::Undo]
                    } else if e.ctrl_key() && e.key() == "y" {
                        e.prevent_default();
                        vec![Msg::Redo]
                    } else {
                        vec![]
                    }
                })}
                rows={1}
                style="width: 100%; min-height: 240px; resize: none; overflow: hidden; font-family: monospace;"
            />
        </div>
    }
}

fn build_preview_tab(editor: &TemplateEditor) -> Html {
    let html = render_preview(&editor.text, &editor.derived_fields(), editor.app.locale, markdown::to_html);
    html! {
        <div class="markdown-preview" dir={editor.app.locale.dir()}>
            { Html::from_html_unchecked(AttrValue::from(html)) }
        </div>
    }
}

/// One card per derived field; each edit sends the whole updated field.
fn build_fields_tab(editor: &TemplateEditor, link: &Scope<TemplateEditor>) -> Html {
    let fields = editor.derived_fields();
    if fields.is_empty() {
        return html! {
            <p class="muted">
                { editor.app.tr(
                    "Aucun champ : insérez un jeton comme /nom_complet dans le texte.",
                    "لا توجد حقول: أدرج رمزاً مثل /nom_complet في النص.",
                ) }
            </p>
        };
    }
    html! {
        <div class="grid">
            { for fields.into_iter().map(|field| field_card(editor, link, field)) }
        </div>
    }
}

fn field_card(editor: &TemplateEditor, link: &Scope<TemplateEditor>, field: Field) -> Html {
    let app = &editor.app;
    let edit = |apply: fn(&mut Field, String)| {
        let field = field.clone();
        link.callback(move |e: InputEvent| {
            let mut updated = field.clone();
            let value = e
                .target_dyn_into::<HtmlInputElement>()
                .map(|input| input.value())
                .or_else(|| e.target_dyn_into::<HtmlTextAreaElement>().map(|area| area.value()))
                .unwrap_or_default();
            apply(&mut updated, value);
            Msg::EditField(updated)
        })
    };
    let on_type = {
        let field = field.clone();
        link.callback(move |e: Event| {
            let mut updated = field.clone();
            let value = e.target_unchecked_into::<HtmlSelectElement>().value();
            updated.field_type = FieldType::parse(&value).unwrap_or_default();
            Msg::EditField(updated)
        })
    };
    let on_required = {
        let field = field.clone();
        link.callback(move |e: Event| {
            let mut updated = field.clone();
            updated.required = e.target_unchecked_into::<HtmlInputElement>().checked();
            Msg::EditField(updated)
        })
    };
    let validation = field.validation.clone().unwrap_or_default();

    html! {
        <div class="card">
            <h3><code>{ format!("/{}", field.id) }</code></h3>
            <div class="form-field">
                <label>{ app.tr("Type", "النوع") }</label>
                <select onchange={on_type}>
                    { for FieldType::ALL.iter().map(|kind| html! {
                        <option value={kind.as_str()} selected={*kind == field.field_type}>{ kind.as_str() }</option>
                    }) }
                </select>
            </div>
            <div class="form-field">
                <label>
                    <input type="checkbox" checked={field.required} onchange={on_required} />
                    { " " }{ app.tr("Obligatoire", "إلزامي") }
                </label>
            </div>
            <div class="form-field">
                <label>{ "Libellé (FR)" }</label>
                <input value={field.label.clone()} oninput={edit(|f, v| f.label = v)} />
            </div>
            <div class="form-field">
                <label>{ "التسمية (AR)" }</label>
                <input dir="rtl" value={field.label_ar.clone()} oninput={edit(|f, v| f.label_ar = v)} />
            </div>
            <div class="form-field">
                <label>{ "Indication (FR)" }</label>
                <input value={field.placeholder.clone()} oninput={edit(|f, v| f.placeholder = v)} />
            </div>
            <div class="form-field">
                <label>{ "التلميح (AR)" }</label>
                <input dir="rtl" value={field.placeholder_ar.clone()} oninput={edit(|f, v| f.placeholder_ar = v)} />
            </div>
            {
                if field.field_type.has_options() {
                    html! {
                        <div class="form-field">
                            <label>{ app.tr("Options : valeur | libellé | التسمية", "الخيارات: القيمة | libellé | التسمية") }</label>
                            <textarea
                                rows={4}
                                value={format_options(&field.options)}
                                oninput={edit(|f, v| f.options = parse_options(&v))}
                            />
                        </div>
                    }
                } else {
                    html! {}
                }
            }
            <div class="form-field">
                <label>{ app.tr("Longueur min / max", "الطول الأدنى / الأقصى") }</label>
                <input
                    type="number"
                    value={validation.min.map(|n| n.to_string()).unwrap_or_default()}
                    oninput={edit(|f, v| validation_mut(f).min = v.trim().parse().ok())}
                />
                <input
                    type="number"
                    value={validation.max.map(|n| n.to_string()).unwrap_or_default()}
                    oninput={edit(|f, v| validation_mut(f).max = v.trim().parse().ok())}
                />
            </div>
            <div class="form-field">
                <label>{ app.tr("Motif (expression régulière)", "النمط (تعبير نمطي)") }</label>
                <input
                    dir="ltr"
                    value={validation.pattern.clone().unwrap_or_default()}
                    oninput={edit(|f, v| validation_mut(f).pattern = Some(v).filter(|p| !p.is_empty()))}
                />
                {
                    if invalid_pattern(std::slice::from_ref(&field)).is_some() {
                        html! {
                            <span class="field-error">
                                { app.tr("Expression invalide, le modèle sera refusé.", "تعبير غير صالح، سيتم رفض النموذج.") }
                            </span>
                        }
                    } else {
                        html! {}
                    }
                }
            </div>
        </div>
    }
}

fn validation_mut(field: &mut Field) -> &mut common::model::field::FieldValidation {
    field.validation.get_or_insert_with(Default::default)
}

fn icon_button(icon_name: &str, label: &str, on_click: Callback<MouseEvent>) -> Html {
    html! {
        <button class="icon-btn" onclick={on_click}>
            <i class="material-icons">{ icon_name.to_string() }</i>
            <span class="icon-label">{ label.to_string() }</span>
        </button>
    }
}

/// Full-screen sheet with the PDF of the saved template.
fn pdf_sheet(editor: &TemplateEditor, link: &Scope<TemplateEditor>) -> Html {
    let app = &editor.app;
    let iframe_style = if editor.pdf_loading {
        "width:100%;height:100%;border:none;background:#fff;visibility:hidden;"
    } else {
        "width:100%;height:100%;border:none;background:#fff;visibility:visible;"
    };

    html! {
        <YwMaterialTopSheet node_ref={editor.pdf_sheet_ref.clone()}>
            <button class="btn secondary" style="position:absolute;top:24px;right:32px;" onclick={link.callback(|_| Msg::ClosePdf)}>
                { "✕" }
            </button>
            <div style="position:relative;width:80vw;height:80vh;">
                {
                    match &editor.pdf_url {
                        Some(url) => html! {
                            <iframe
                                src={url.clone()}
                                style={iframe_style}
                                onload={link.callback(|_: Event| Msg::PdfLoaded)}
                            />
                        },
                        None => html! {},
                    }
                }
                {
                    if editor.pdf_loading {
                        html! {
                            <div style="position:absolute;inset:0;display:flex;align-items:center;justify-content:center;background:#fff;color:#000;">
                                { app.tr("Génération du PDF...", "جار إنشاء ملف PDF...") }
                            </div>
                        }
                    } else {
                        html! {}
                    }
                }
            </div>
        </YwMaterialTopSheet>
    }
}
