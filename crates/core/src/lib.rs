pub mod camera {
    pub mod domain {
        pub mod camera;
    }
    pub mod infrastructure;
}

pub mod capture {
    pub mod domain {
        pub mod capture_sequencer;
        pub mod captured_still;
        pub mod photo_slot;
    }
    pub mod still_compositor;
}

pub mod landmarks {
    pub mod domain {
        pub mod face_anchors;
        pub mod landmark_set;
        pub mod landmark_source;
    }
    pub mod infrastructure;
}

pub mod overlay {
    pub mod domain {
        pub mod filter_geometry;
        pub mod filter_variant;
        pub mod primitive;
        pub mod primitive_renderer;
    }
    pub mod infrastructure;
}

pub mod pipeline {
    pub mod booth_error;
    pub mod detection_loop;
    pub mod overlay_renderer;
    pub mod photo_booth;
    pub mod print_flow;
    pub mod session_state;
}

pub mod printing {
    pub mod domain {
        pub mod preview_renderer;
        pub mod print_quantity;
        pub mod print_sink;
    }
    pub mod infrastructure;
    pub mod print_preview;
}

pub mod shared {
    pub mod color;
    pub mod constants;
    pub mod frame;
    pub mod point;
    pub mod settings;
}
