mod rotation_matrix;

pub use rotation_matrix::RotationMatrix3;
