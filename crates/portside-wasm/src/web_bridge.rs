use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use js_sys::Reflect;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{console, Document, HtmlAudioElement, HtmlScriptElement};

use portside_core::{
    run_startup, AudioHost, BridgeConfig, BridgeError, ErrorCode, InjectPolicy, PortRegistry,
    Result as CoreResult, ScriptHost, ScriptTag, PORT_PLAY_CHIRP,
};

/// Audio adapter backed by the browser media subsystem.
///
/// Each `play` call allocates a fresh element and starts playback without
/// awaiting the returned promise; once playback ends and the handle is
/// unreferenced the host reclaims it.
#[derive(Debug, Default)]
pub struct WebAudioHost;

impl AudioHost for WebAudioHost {
    fn play(&self, source: &str) -> CoreResult<()> {
        let audio = HtmlAudioElement::new_with_src(source)
            .map_err(|err| dom_error("create audio element", &err))?;
        // Playback completion is not observed.
        let _ = audio.play();
        Ok(())
    }
}

/// Script adapter appending vendor tags to the document head.
#[derive(Debug, Default)]
pub struct WebScriptHost;

impl WebScriptHost {
    fn document() -> CoreResult<Document> {
        let window = web_sys::window()
            .ok_or_else(|| BridgeError::new(ErrorCode::NotSupported, "no window in this context"))?;
        window
            .document()
            .ok_or_else(|| BridgeError::new(ErrorCode::NotSupported, "window has no document"))
    }
}

impl ScriptHost for WebScriptHost {
    fn inject(&self, tag: &ScriptTag) -> CoreResult<()> {
        let document = Self::document()?;
        let element = document
            .create_element("script")
            .map_err(|err| dom_error("create script element", &err))?;
        let script: HtmlScriptElement = element
            .dyn_into()
            .map_err(|_| BridgeError::new(ErrorCode::Dom, "created element is not a script"))?;
        script.set_type(&tag.script_type);
        script.set_src(&tag.src);
        let head = document
            .head()
            .ok_or_else(|| BridgeError::new(ErrorCode::Dom, "document has no head"))?;
        head.append_child(&script)
            .map_err(|err| dom_error("append script element", &err))?;
        trace(&format!("appended vendor script {}", tag.src));
        Ok(())
    }

    fn is_injected(&self, src: &str) -> bool {
        let Ok(document) = Self::document() else {
            return false;
        };
        document
            .query_selector(&format!("script[src=\"{}\"]", src))
            .ok()
            .flatten()
            .is_some()
    }
}

/// Browser-side bridge between the application's outbound ports and the
/// host audio and script capabilities.
///
/// Boot it, run the startup phase, then attach it to the application
/// handle:
///
/// ```js
/// const bridge = WebBridge.boot();
/// bridge.injectVendorScripts();
/// bridge.attach(app);
/// ```
#[wasm_bindgen]
pub struct WebBridge {
    registry: Rc<RefCell<PortRegistry>>,
    script: WebScriptHost,
    config: BridgeConfig,
    subscriptions: RefCell<Vec<Closure<dyn FnMut(JsValue)>>>,
}

#[wasm_bindgen]
impl WebBridge {
    /// Bridge with the stock ports and vendor scripts.
    #[wasm_bindgen(js_name = boot)]
    pub fn boot() -> WebBridge {
        Self::with_config(BridgeConfig::default(), None)
    }

    /// Bridge configured from an options object:
    /// `{ dedupeScripts?, chirpClip?, vendorScripts? }`.
    #[wasm_bindgen(js_name = bootWithOptions)]
    pub fn boot_with_options(options: Option<JsValue>) -> Result<WebBridge, JsValue> {
        let mut config = BridgeConfig::default();
        if options_bool(&options, "dedupeScripts", false)? {
            config.script_policy = InjectPolicy::Once;
        }
        if let Some(sources) = options_string_array(&options, "vendorScripts")? {
            config.vendor_scripts = sources.into_iter().map(ScriptTag::external).collect();
        }
        let chirp = options_string(&options, "chirpClip")?;
        Ok(Self::with_config(config, chirp.as_deref()))
    }

    fn with_config(config: BridgeConfig, chirp_clip: Option<&str>) -> WebBridge {
        let audio: Arc<dyn AudioHost> = Arc::new(WebAudioHost);
        let mut registry = PortRegistry::with_default_ports(audio);
        if let Some(clip) = chirp_clip {
            registry.bind_fixed_clip(PORT_PLAY_CHIRP, clip);
        }
        WebBridge {
            registry: Rc::new(RefCell::new(registry)),
            script: WebScriptHost,
            config,
            subscriptions: RefCell::new(Vec::new()),
        }
    }

    /// Bind an extra channel whose payload names the resource to play.
    #[wasm_bindgen(js_name = bindSound)]
    pub fn bind_sound(&self, port: &str) {
        self.registry.borrow_mut().bind_sound(port);
    }

    /// Bind an extra channel that always plays `clip`.
    #[wasm_bindgen(js_name = bindFixedClip)]
    pub fn bind_fixed_clip(&self, port: &str, clip: &str) {
        self.registry.borrow_mut().bind_fixed_clip(port, clip);
    }

    /// Startup phase: attach the configured vendor scripts to the page.
    ///
    /// Call exactly once per application start, before `attach`.
    #[wasm_bindgen(js_name = injectVendorScripts)]
    pub fn inject_vendor_scripts(&self) {
        trace("running startup script injection");
        run_startup(&self.script, &self.config);
    }

    /// Subscribe every bound port present on the application handle.
    ///
    /// Ports the application does not expose are skipped; a subscription
    /// delivers each notification payload as an optional string to the
    /// port registry and reports nothing back.
    #[wasm_bindgen(js_name = attach)]
    pub fn attach(&self, app: &JsValue) -> Result<(), JsValue> {
        let ports = Reflect::get(app, &JsValue::from_str("ports"))?;
        if ports.is_null() || ports.is_undefined() {
            return Err(js_error("app handle has no ports object"));
        }
        let names: Vec<String> = self
            .registry
            .borrow()
            .port_names()
            .map(String::from)
            .collect();
        for name in names {
            let port = Reflect::get(&ports, &JsValue::from_str(&name))?;
            if port.is_null() || port.is_undefined() {
                trace(&format!("port {} not exposed by app, skipping", name));
                continue;
            }
            let subscribe = Reflect::get(&port, &JsValue::from_str("subscribe"))?;
            let subscribe: js_sys::Function = subscribe
                .dyn_into()
                .map_err(|_| js_error("port has no subscribe function"))?;
            let registry = Rc::clone(&self.registry);
            let port_name = name.clone();
            let callback = Closure::<dyn FnMut(JsValue)>::new(move |payload: JsValue| {
                trace(&format!("starting {}", port_name));
                let payload = payload.as_string();
                registry.borrow().dispatch(&port_name, payload.as_deref());
            });
            subscribe.call1(&port, callback.as_ref())?;
            self.subscriptions.borrow_mut().push(callback);
            trace(&format!("subscribed {}", name));
        }
        Ok(())
    }
}

fn trace(message: &str) {
    console::log_1(&JsValue::from_str(&format!("portside: {}", message)));
}

fn dom_error(context: &str, value: &JsValue) -> BridgeError {
    let detail = value
        .as_string()
        .unwrap_or_else(|| format!("{:?}", value));
    BridgeError::new(ErrorCode::Dom, format!("{}: {}", context, detail))
}

fn js_error(message: &str) -> JsValue {
    js_sys::Error::new(message).into()
}

fn options_bool(options: &Option<JsValue>, key: &str, default: bool) -> Result<bool, JsValue> {
    let Some(options) = options else {
        return Ok(default);
    };
    if options.is_null() || options.is_undefined() {
        return Ok(default);
    }
    if !options.is_object() {
        return Err(js_error("options must be an object"));
    }
    let value = Reflect::get(options, &JsValue::from_str(key))?;
    if value.is_null() || value.is_undefined() {
        return Ok(default);
    }
    Ok(value.as_bool().unwrap_or(default))
}

fn options_string(options: &Option<JsValue>, key: &str) -> Result<Option<String>, JsValue> {
    let Some(options) = options else {
        return Ok(None);
    };
    if options.is_null() || options.is_undefined() {
        return Ok(None);
    }
    if !options.is_object() {
        return Err(js_error("options must be an object"));
    }
    let value = Reflect::get(options, &JsValue::from_str(key))?;
    if value.is_null() || value.is_undefined() {
        return Ok(None);
    }
    value
        .as_string()
        .ok_or_else(|| js_error("option value must be a string"))
        .map(Some)
}

fn options_string_array(
    options: &Option<JsValue>,
    key: &str,
) -> Result<Option<Vec<String>>, JsValue> {
    let Some(options) = options else {
        return Ok(None);
    };
    if options.is_null() || options.is_undefined() {
        return Ok(None);
    }
    if !options.is_object() {
        return Err(js_error("options must be an object"));
    }
    let value = Reflect::get(options, &JsValue::from_str(key))?;
    if value.is_null() || value.is_undefined() {
        return Ok(None);
    }
    let array: js_sys::Array = value
        .dyn_into()
        .map_err(|_| js_error("vendorScripts must be an array"))?;
    let mut sources = Vec::new();
    for entry in array.iter() {
        let entry = entry
            .as_string()
            .ok_or_else(|| js_error("vendorScripts entries must be strings"))?;
        sources.push(entry);
    }
    Ok(Some(sources))
}
